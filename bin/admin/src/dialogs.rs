use dialoguer::Confirm;
use uam_client::{Dialogs, Notice, NoticeLevel};

/// Dialogs rendered on the terminal
#[derive(Debug, Default)]
pub struct TerminalDialogs;

impl Dialogs for TerminalDialogs {
    fn notify(&self, notice: Notice) {
        let marker = match notice.level {
            NoticeLevel::Success => "+",
            NoticeLevel::Warning => "!",
            NoticeLevel::Error => "x",
        };
        println!("[{marker}] {}", notice.message);
    }

    fn confirm(&self, prompt: &str) -> bool {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!("Confirmation prompt failed: {e}");
                false
            })
    }
}
