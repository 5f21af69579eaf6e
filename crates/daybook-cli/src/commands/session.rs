use super::Context;
use super::render::print_session;
use anyhow::{Result, bail};
use daybook_core::chat::ChatDate;
use daybook_core::session::{SessionView, SessionViewState};

pub async fn calendar(context: &Context) -> Result<()> {
    let dates = context.sessions().chat_dates().await?;
    if dates.is_empty() {
        println!("No chats yet");
    }
    for date in dates {
        println!("{}", date);
    }
    Ok(())
}

/// `show_messages` prints the chain even when the chat is sealed.
pub async fn open(context: &Context, date: ChatDate, show_messages: bool) -> Result<()> {
    let mut state = context.sessions().open_session(date).await;
    if show_messages {
        state.show(SessionView::Messages);
    }
    finish(&state)
}

pub async fn send(context: &Context, date: ChatDate, content: &str) -> Result<()> {
    let sessions = context.sessions();
    let state = sessions.open_session(date).await;
    if state.is_sealed() {
        bail!("the chat for {} is sealed; edit its diary instead", date);
    }
    let state = sessions.send_user_message(state, content).await;
    finish(&state)
}

pub async fn seal(context: &Context, date: ChatDate) -> Result<()> {
    let sessions = context.sessions();
    let state = sessions.open_session(date).await;
    let state = sessions.seal_chat(state).await;
    finish(&state)
}

pub async fn edit_diary(context: &Context, date: ChatDate, title: &str, body: &str) -> Result<()> {
    let sessions = context.sessions();
    let state = sessions.open_session(date).await;
    if state.diary().is_none() && state.error().is_none() {
        bail!("the chat for {} has no diary yet; seal it first", date);
    }
    let state = sessions.revise_diary(state, title, body).await;
    finish(&state)
}

/// Prints the session and turns a populated error slot into a failing exit.
fn finish(state: &SessionViewState) -> Result<()> {
    print_session(state);
    if let Some(error) = state.error() {
        tracing::debug!("[daybook] Command finished with error: {}", error);
        bail!("{}", error);
    }
    Ok(())
}
