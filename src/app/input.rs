use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use super::core::{App, MessageType, Mode};
use crate::error::MintResult;

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Pair,
    CycleNetwork,
    Disconnect,
    Type(char),
    Backspace,
    NextField,
    PreviousField,
    CycleStyle { forward: bool },
    Generate,
    Cancel,
    DismissError,
    SelectNext,
    SelectPrevious,
    Mint,
    OpenCreate,
    Refresh,
    CreateType(char),
    CreateBackspace,
    CreateToggleField,
    CreateSubmit,
    CloseCreate,
}

/// Translate a key press into a command for the current mode.
pub fn map_key(app: &App, key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('d') if app.mode() != Mode::Connect => Some(Command::Disconnect),
            _ => None,
        };
    }

    match app.mode() {
        Mode::Connect => match key.code {
            KeyCode::Enter => Some(Command::Pair),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::CycleNetwork),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
        Mode::Form => match key.code {
            KeyCode::Char(c) => Some(Command::Type(c)),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Tab => Some(Command::NextField),
            KeyCode::BackTab => Some(Command::PreviousField),
            KeyCode::Left => Some(Command::CycleStyle { forward: false }),
            KeyCode::Right => Some(Command::CycleStyle { forward: true }),
            KeyCode::Enter => Some(Command::Generate),
            KeyCode::Esc if app.has_error() || app.form.has_errors() => Some(Command::DismissError),
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
        Mode::Generating => match key.code {
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc => Some(Command::Cancel),
            _ => None,
        },
        Mode::Minting => None,
        Mode::Preview => match key.code {
            KeyCode::Up => Some(Command::SelectPrevious),
            KeyCode::Down => Some(Command::SelectNext),
            KeyCode::Enter | KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::Mint),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::OpenCreate),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Refresh),
            KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::Cancel),
            KeyCode::Esc if app.has_error() => Some(Command::DismissError),
            KeyCode::Esc => Some(Command::Cancel),
            _ => None,
        },
        Mode::CreateCollection => match key.code {
            KeyCode::Char(c) => Some(Command::CreateType(c)),
            KeyCode::Backspace => Some(Command::CreateBackspace),
            KeyCode::Tab | KeyCode::BackTab => Some(Command::CreateToggleField),
            KeyCode::Enter => Some(Command::CreateSubmit),
            KeyCode::Esc => Some(Command::CloseCreate),
            _ => None,
        },
        Mode::Minted => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('X') => {
                Some(Command::Cancel)
            }
            _ => None,
        },
    }
}

/// Run a command. Failures are shown in the message panel.
pub async fn dispatch(app: &Arc<Mutex<App>>, command: Command) {
    debug!(?command, "dispatch");
    let result: MintResult<()> = match command {
        Command::Quit => {
            app.lock().await.should_quit = true;
            Ok(())
        }
        Command::Pair => App::pair_wallet(app).await,
        Command::CycleNetwork => app.lock().await.cycle_network(),
        Command::Disconnect => App::disconnect_wallet(app).await,
        Command::Type(c) => {
            app.lock().await.form.insert_char(c);
            Ok(())
        }
        Command::Backspace => {
            app.lock().await.form.backspace();
            Ok(())
        }
        Command::NextField => {
            app.lock().await.form.next_field();
            Ok(())
        }
        Command::PreviousField => {
            app.lock().await.form.previous_field();
            Ok(())
        }
        Command::CycleStyle { forward } => {
            app.lock().await.form.cycle_style(forward);
            Ok(())
        }
        Command::Generate => App::submit_generation(app).await.map(drop),
        Command::Cancel => app.lock().await.cancel_workflow(),
        Command::DismissError => {
            app.lock().await.dismiss_error();
            Ok(())
        }
        Command::SelectNext => {
            app.lock().await.next_item();
            Ok(())
        }
        Command::SelectPrevious => {
            app.lock().await.previous_item();
            Ok(())
        }
        Command::Mint => App::submit_mint(app).await.map(drop),
        Command::OpenCreate => app.lock().await.open_create_dialog(),
        Command::Refresh => {
            let preselect = app.lock().await.selected_collection().map(|c| c.id);
            App::load_collections(app, preselect).await;
            Ok(())
        }
        Command::CreateType(c) => {
            if let Some(dialog) = app.lock().await.create_dialog.as_mut() {
                dialog.insert_char(c);
            }
            Ok(())
        }
        Command::CreateBackspace => {
            if let Some(dialog) = app.lock().await.create_dialog.as_mut() {
                dialog.backspace();
            }
            Ok(())
        }
        Command::CreateToggleField => {
            if let Some(dialog) = app.lock().await.create_dialog.as_mut() {
                dialog.toggle_field();
            }
            Ok(())
        }
        Command::CreateSubmit => App::submit_create_collection(app).await.map(drop),
        Command::CloseCreate => {
            app.lock().await.create_dialog = None;
            Ok(())
        }
    };

    if let Err(e) = result {
        app.lock().await.set_message(MessageType::Error, e.to_string());
    }
}
