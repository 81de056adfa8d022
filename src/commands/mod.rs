mod comment;
mod create;
mod edit;
mod ls;
mod show;
mod status;
mod theme;

pub use comment::cmd_comment;
pub use create::cmd_create;
pub use edit::cmd_edit;
pub use ls::cmd_ls;
pub use show::cmd_show;
pub use status::{cmd_priority, cmd_status};
pub use theme::{cmd_theme_set, cmd_theme_show, cmd_theme_toggle};

use tokio::sync::{Notify, watch};

use crate::error::Result;
use crate::screen::{Navigator, ViewState};

/// Print a JSON value to stdout, pretty-printed.
pub(crate) fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Wait for a resource channel to leave Loading. Returns the Ready value,
/// or `None` if the fetch failed or the screen went away.
pub(crate) async fn settle<T: Clone>(rx: &mut watch::Receiver<ViewState<T>>) -> Option<T> {
    loop {
        match &*rx.borrow() {
            ViewState::Ready(value) => return Some(value.clone()),
            ViewState::Failed => return None,
            ViewState::Loading => {}
        }
        if rx.changed().await.is_err() {
            return None;
        }
    }
}

/// Wait until `busy` reports false for the channel's value, then return
/// that settled value.
pub(crate) async fn wait_while<T: Clone>(
    rx: &mut watch::Receiver<T>,
    busy: impl Fn(&T) -> bool,
) -> T {
    loop {
        {
            let current = rx.borrow();
            if !busy(&current) {
                return current.clone();
            }
        }
        if rx.changed().await.is_err() {
            return rx.borrow().clone();
        }
    }
}

/// Terminal stand-in for router navigation. The form's post-save redirect
/// prints a follow-up hint instead of switching screens, and the command
/// awaits `wait` so it exits only after the redirect fired.
pub(crate) struct CliNavigator {
    quiet: bool,
    done: Notify,
}

impl CliNavigator {
    pub(crate) fn new(quiet: bool) -> Self {
        Self {
            quiet,
            done: Notify::new(),
        }
    }

    pub(crate) async fn wait(&self) {
        self.done.notified().await;
    }
}

impl Navigator for CliNavigator {
    fn go_to_list(&self) {
        if !self.quiet {
            println!("Volviendo al listado: taquilla ls");
        }
        self.done.notify_one();
    }

    fn go_to_detail(&self, id: crate::types::TicketId) {
        if !self.quiet {
            println!("Ver detalle: taquilla show {id}");
        }
        self.done.notify_one();
    }
}
