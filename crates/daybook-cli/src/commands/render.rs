//! Plain-text rendering of a session.

use daybook_core::chat::{Diary, MessageRole};
use daybook_core::session::{SessionView, SessionViewState};

pub fn print_session(state: &SessionViewState) {
    println!("== {} ==", state.date());

    if let Some(error) = state.error() {
        println!("! {}", error);
    }

    match (state.view(), state.diary()) {
        (SessionView::Diary, Some(diary)) => print_diary(diary),
        _ => print_messages(state),
    }
}

fn print_messages(state: &SessionViewState) {
    for message in state.messages() {
        let speaker = match message.role {
            MessageRole::Counterpart => "daybook",
            MessageRole::User => "you",
        };
        println!("[{}] {}", speaker, message.content);
    }

    if state.is_sealed() {
        println!("(sealed: this chat has a diary)");
    }
}

pub fn print_diary(diary: &Diary) {
    println!("# {}", diary.title);
    println!();
    println!("{}", diary.body);
}
