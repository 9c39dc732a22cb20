use anyhow::Result;
use colored::Colorize;
use habit_core::validation::{SignInForm, SignUpForm, password_strength};
use rustyline::DefaultEditor;

use crate::app::App;
use crate::prompt::{confirm, value_or_ask};
use crate::render;

pub async fn signup(
    app: &App,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    accept_terms: bool,
) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let username = value_or_ask(&mut rl, username, "Username")?;
    let email = value_or_ask(&mut rl, email, "Email")?;
    let password = value_or_ask(&mut rl, password, "Password")?;
    render::print_password_hint(&password_strength(&password));
    let accept_terms = accept_terms || confirm(&mut rl, "Accept the terms and conditions?")?;

    let form = SignUpForm {
        username,
        email,
        password,
        accept_terms,
    };
    app.auth.sign_up(&form).await?;
    render::success("Account created. Sign in with `habit signin`.");
    Ok(())
}

pub async fn signin(app: &App, email: Option<String>, password: Option<String>) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let email = value_or_ask(&mut rl, email, "Email")?;
    let password = value_or_ask(&mut rl, password, "Password")?;

    app.auth.sign_in(&SignInForm::new(email, password)).await?;
    render::success("Signed in.");
    Ok(())
}

pub async fn signout(app: &App) -> Result<()> {
    app.auth.sign_out().await?;
    render::success("Signed out.");
    Ok(())
}

pub fn status(app: &App) {
    if app.session.is_authenticated() {
        println!("{}", "Signed in".bright_green());
    } else {
        println!("{}", "Signed out".yellow());
    }
    println!("{}", format!("Service: {}", app.config.base_url).bright_black());
    println!("{}", format!("Token file: {}", app.token_path.display()).bright_black());
}
