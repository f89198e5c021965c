//! Situation prompter adapters.

mod console_prompter;
mod scripted_prompter;

pub use console_prompter::ConsolePrompter;
pub use scripted_prompter::ScriptedPrompter;
