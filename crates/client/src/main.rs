//! Webcom Client - terminal front-end
//!
//! Usage:
//!   webcom-client login <email> <password>
//!   webcom-client signup <username> <email> <password>
//!   webcom-client logout
//!   webcom-client            (interactive hangouts session)

use anyhow::{bail, Context};
use tokio::io::{AsyncBufReadExt, BufReader};
use webcom_client::{
    commands::{parse_input, Input, HELP},
    logging::init_tracing,
    storage::FileStore,
    hangouts::SearchOutcome,
    ws::{ConnectionState, ReconnectConfig, WsConnection},
    ApiClient, AuthSession, ClientConfig, Hangouts, HangoutsApi, KeyValueStore,
};
use webcom_shared::HangoutCommand;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("webcom_client=debug");

    let config = ClientConfig::from_env();
    let store = match &config.storage_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::in_config_dir().context("no storage directory available")?,
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["login", email, password] => {
            let auth = ApiClient::new()
                .with_base_url(&config.api_url)
                .login(email, password)
                .await?;
            AuthSession::from(auth).save(&store)?;
            println!("Logged in");
            Ok(())
        }
        ["signup", username, email, password] => {
            let auth = ApiClient::new()
                .with_base_url(&config.api_url)
                .signup(username, email, password)
                .await?;
            AuthSession::from(auth).save(&store)?;
            println!("Signed up");
            Ok(())
        }
        ["logout"] => {
            AuthSession::clear(&store)?;
            println!("Logged out");
            Ok(())
        }
        [] => run(config, store).await,
        _ => bail!("usage: webcom-client [login <email> <password> | signup <username> <email> <password> | logout]"),
    }
}

fn resolve_session<S: KeyValueStore>(config: &ClientConfig, store: &S) -> anyhow::Result<AuthSession> {
    if let Some(session) = AuthSession::load(store)? {
        return Ok(session);
    }
    match &config.username {
        Some(username) => Ok(AuthSession::new(
            username.clone(),
            config.email.clone().unwrap_or_default(),
        )),
        None => bail!("not logged in: run `webcom-client login` or set WEBCOM_USERNAME"),
    }
}

async fn run(config: ClientConfig, store: FileStore) -> anyhow::Result<()> {
    let session = resolve_session(&config, &store)?;
    let url = session.ws_url(&config.ws_host)?;

    let (events_tx, mut events) = tokio::sync::mpsc::unbounded_channel();
    let connection = WsConnection::connect(url, ReconnectConfig::default(), move |event| {
        let _ = events_tx.send(event);
    });

    let mut socket_state = connection.subscribe_state();

    let api = session.client(&config.api_url);
    let mut hangouts = Hangouts::new(&session, store, api).with_socket(connection.handle());
    hangouts.mount();

    println!("Signed in as {}. Type /help for commands.", session.username);
    print_hangouts(&hangouts);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(input)) => handle_input(&mut hangouts, input).await,
                    Ok(None) => {}
                    Err(e) => println!("{e}"),
                }
            }
            Ok(()) = socket_state.changed() => {
                if let ConnectionState::Failed { reason } = &*socket_state.borrow_and_update() {
                    println!("connection lost: {reason}");
                }
            }
            Some(event) = events.recv() => {
                let before = hangouts.route();
                hangouts.on_socket_event(event);
                if hangouts.route() != before {
                    println!("-> {}", hangouts.route());
                }
            }
        }
    }

    drop(connection);
    Ok(())
}

async fn handle_input<S, A>(hangouts: &mut Hangouts<S, A>, input: Input)
where
    S: KeyValueStore + Clone,
    A: HangoutsApi,
{
    match input {
        Input::Search(text) => {
            hangouts.on_search(&text);
            match hangouts.on_start_search().await {
                SearchOutcome::Hangouts(_) => print_hangouts(hangouts),
                SearchOutcome::Users(users) => {
                    println!("No hangouts found. Users:");
                    for user in users {
                        println!("  user {} <{}>", user.username, user.email);
                    }
                }
                SearchOutcome::Failed(error) => {
                    println!("search failed: {}", error.user_message())
                }
            }
        }
        Input::Open(username) => {
            hangouts.on_select_hangout(&username);
            for message in hangouts.state().messages() {
                println!("  [{}] {}", message.username, message.text);
            }
            println!("-> {}", hangouts.route());
        }
        Input::User(username) => {
            hangouts.on_select_user(&username);
            println!("-> {}", hangouts.route());
        }
        Input::Command(command) => hangouts.on_hangout(command),
        Input::Say(text) => {
            hangouts.on_message_text(&text);
            hangouts.on_hangout(HangoutCommand::Message);
        }
        Input::List => print_hangouts(hangouts),
        Input::Help => println!("{HELP}"),
        Input::Quit => {}
    }
}

fn print_hangouts<S, A>(hangouts: &Hangouts<S, A>)
where
    S: KeyValueStore + Clone,
    A: HangoutsApi,
{
    let online = if hangouts.state().online { "online" } else { "offline" };
    println!("Hangouts ({online}):");
    for hangout in hangouts.state().hangouts() {
        let last = hangout.message.as_ref().map(|m| m.text.as_str()).unwrap_or("");
        println!("  {:<16} {:<10} {}", hangout.username, hangout.state, last);
    }
}
