//! Login, register, whoami and logout commands.

use common::{AppError, AppResult};
use domain::UserType;

use super::session::CliSession;
use super::{print_notification, FlagHint};
use crate::cli::args::{LoginArgs, RegisterArgs};
use crate::context::AppContext;
use crate::pages::{LoginPage, RegisterPage, LOGIN_FAILED_MESSAGE, REGISTER_FAILED_MESSAGE};
use crate::session::SessionState;
use crate::validation::FocusTarget;

/// Execute the login command
pub async fn login(args: LoginArgs, session: &CliSession) -> AppResult<()> {
    let ctx = session.context();
    let page = LoginPage::new(ctx);
    page.set_email(args.email);
    page.set_password(args.password);

    let mut hint = FlagHint::default();
    match page.submit_focused(&mut hint).await {
        Ok(user) => {
            session.persist().await?;
            print_notification(ctx);
            println!("Logged in as {} <{}> ({})", user.name, user.email, user.user_type);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message(LOGIN_FAILED_MESSAGE));
            Err(err)
        }
    }
}

/// Execute the register command
pub async fn register(args: RegisterArgs, ctx: &AppContext) -> AppResult<()> {
    let mut hint = FlagHint::default();
    let user_type = match args.user_type.parse::<UserType>() {
        Ok(user_type) => user_type,
        Err(e) => {
            let err = AppError::from(e);
            if let Some(field) = err.invalid_field() {
                hint.focus_field(field);
            }
            eprintln!("{}", err.user_message(REGISTER_FAILED_MESSAGE));
            return Err(err);
        }
    };

    let page = RegisterPage::new(ctx);
    page.set_name(args.name);
    page.set_email(args.email);
    page.set_password(args.password);
    page.set_user_type(user_type);

    match page.submit_focused(&mut hint).await {
        Ok(()) => {
            print_notification(ctx);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message(REGISTER_FAILED_MESSAGE));
            Err(err)
        }
    }
}

/// Execute the whoami command
pub async fn whoami(session: &CliSession) -> AppResult<()> {
    let ctx = session.context();
    let _load = ctx.start();

    match ctx.session().wait_ready().await {
        SessionState::Authenticated(user) => {
            let badge = user.initial().map(String::from).unwrap_or_default();
            println!("[{}] {} <{}> ({})", badge, user.name, user.email, user.user_type);
        }
        _ => println!("Not logged in"),
    }
    Ok(())
}

/// Execute the logout command
pub async fn logout(session: &CliSession) -> AppResult<()> {
    let ctx = session.context();
    let result = ctx.logout().await;

    // The local copy goes even when the server call fails.
    session.forget().await?;
    result?;
    print_notification(ctx);
    Ok(())
}
