//! Walks a visitor through the Parlor client core against in-memory
//! backends: anonymous visit, gated pages, sign-in, drafting, sign-out.
//!
//! Run with `RUST_LOG=parlor=debug` to see every transition.

use std::time::Duration;

use parlor::prelude::*;

fn character(id: u64, administrator: bool) -> IdentityResponse {
    IdentityResponse {
        id: CharacterId(id),
        csrf_token: format!("csrf-{id}"),
        notification_token: format!("notify-{id}"),
        exists_unread_notification: false,
        exists_unread_mail: true,
        administrator,
    }
}

fn show(label: &str, status: AuthenticationStatus) {
    println!(
        "{label:<22} tried={} authenticated={} administrator={}",
        status.is_authentication_tried,
        status.is_authenticated,
        status.is_administrator_authenticated
    );
}

async fn visit<B: SessionBackend, S: DraftStorage>(
    client: &ParlorClient<B, S>,
    gate: AuthGate,
    path: &str,
) -> Result<(), ParlorError> {
    let navigator = RecordingNavigator::new();
    let state = client.watch_gate(gate, path, &navigator).await?;
    match navigator.commands().first() {
        Some(command) => println!("{path:<22} {state} -> {}", command.location()),
        None => println!("{path:<22} {state}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ParlorError> {
    if let Err(e) = parlor::init_tracing("console_session=info,parlor=info,warn") {
        eprintln!("tracing already initialized: {e}");
    }

    let backend = MemoryBackend::new()
        .with_account("mira", "lantern", character(7, false))
        .with_account("keeper", "ledger", character(1, true));
    let drafts = MemoryDraftStorage::new().with_autosave("Dear innkeeper,");

    let client = ParlorClientBuilder::new()
        .sign_in_path("/signin")
        .autosave_debounce(Duration::from_millis(300))
        .build(backend, drafts);

    show("before bootstrap", client.authentication_status());
    show("after bootstrap", client.bootstrap().await);
    if client.is_draft_ready() {
        println!("restored draft         {:?}", client.auto_saved_message());
    }

    visit(&client, client.require_authenticated(), "/mails").await?;

    client.sign_in("mira", "lantern").await?;
    show("signed in as mira", client.authentication_status());
    if let Some(header) = client.csrf_header() {
        let (name, value) = header.as_pair();
        println!("{:<22} {name}: {value}", "mutating requests");
    }
    visit(&client, client.require_authenticated(), "/mails").await?;
    visit(&client, client.require_administrator_authenticated(), "/control").await?;

    client.message_auto_save_request("Dear innkeeper, a room for two");
    client.message_auto_save_request("Dear innkeeper, a room for two nights");
    tokio::time::sleep(Duration::from_millis(500)).await;
    println!("auto-saved draft       {:?}", client.auto_saved_message());

    client.read_all_mails();
    client.sign_out().await?;
    show("signed out", client.authentication_status());

    client.sign_in("keeper", "ledger").await?;
    visit(&client, client.require_administrator_authenticated(), "/control").await?;

    if let Err(e) = client.sign_in("keeper", "wrong").await {
        tracing::info!(error = %e, "rejected as expected");
    }

    client.shutdown().await;
    Ok(())
}
