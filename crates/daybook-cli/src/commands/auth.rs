use super::Context;
use anyhow::Result;
use daybook_core::api::SignupRequest;

pub async fn login(context: &Context, email: &str, password: &str) -> Result<()> {
    context.auth().login(email, password).await?;
    println!("Logged in as {}", email);
    Ok(())
}

pub async fn signup(
    context: &Context,
    name: String,
    email: String,
    password: String,
    phone_number: String,
) -> Result<()> {
    let request = SignupRequest {
        name,
        email,
        password,
        phone_number,
    };
    context.auth().signup(&request).await?;
    println!("Account created, logged in as {}", request.email);
    Ok(())
}

pub async fn logout(context: &Context) -> Result<()> {
    context.auth().logout().await?;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(context: &Context) -> Result<()> {
    let auth = context.auth();
    let signed_in = auth.is_signed_in().await?;
    match auth.current_login_email().await? {
        Some(email) if signed_in => println!("{}", email),
        Some(email) => println!("{} (session expired, log in again)", email),
        None => println!("Not logged in"),
    }
    Ok(())
}
