//! Account commands: login, register, logout, verify.
//!
//! `login` and `register` collect passwords through the prompt state machine.
//! The prompt is closed before the network call starts, so a failed or
//! abandoned request never leaves the terminal answering a stale question.

use std::sync::Arc;

use termd_types::{Result, TermError};

use crate::interpreter::{Command, CommandRegistry, Environment, Execution, Output, completion};
use crate::parser::Options;
use crate::prompt::StepId;

pub const LOGIN_PASS: StepId = "login_pass";
pub const REGISTER_PASS_1: StepId = "register_pass_1";
pub const REGISTER_PASS_2: StepId = "register_pass_2";

const PASSWORD: &str = "Password:";
const CONFIRM_PASSWORD: &str = "Confirm password:";

/// Register account commands into a registry.
pub fn register_auth_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(LoginCmd));
    reg.register(Box::new(RegisterCmd));
    reg.register(Box::new(LogoutCmd));
    reg.register(Box::new(VerifyCmd));
}

/// Email given as `-u <email>` or `-u=<email>`.
fn email_arg<'a>(args: &[&'a str], options: &'a Options) -> Option<&'a str> {
    options
        .value("u")
        .or_else(|| options.is_set("u").then(|| args.first().copied()).flatten())
        .filter(|e| !e.is_empty())
}

fn auth_error(e: impl std::fmt::Display) -> Output {
    Output::Line(TermError::Auth(e.to_string()).to_string())
}

// ---------------------------------------------------------------------------
// login
// ---------------------------------------------------------------------------

struct LoginCmd;

impl LoginCmd {
    fn submit(&self, password: &str, env: &mut Environment<'_>) -> Execution {
        let answers = env.state.prompt.finish();
        let Some(email) = answers.into_iter().next() else {
            return Execution::silent();
        };
        let auth = Arc::clone(env.auth);
        let password = password.to_string();
        Execution::pending(async move {
            let result = auth.login(&email, &password).await;
            completion(move |env: &mut Environment<'_>| match result {
                Ok(data) => {
                    let username = data.user.username.clone();
                    log::info!("logged in as {username}");
                    if let Err(e) = env.tokens.save(&data.token) {
                        log::warn!("could not persist session token: {e}");
                    }
                    env.state.session = Some(data.user);
                    Output::Line(format!("Login successful! Welcome back, {username}."))
                },
                Err(e) => {
                    log::warn!("login failed: {e}");
                    auth_error(e)
                },
            })
        })
    }
}

impl Command for LoginCmd {
    fn name(&self) -> &str {
        "login"
    }
    fn description(&self) -> &str {
        "Log in with your email address. You will be asked for your password."
    }
    fn usage(&self) -> &str {
        "login -u <email>"
    }
    fn execute(&self, args: &[&str], options: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        if env.state.prompt.step_for(self.name()) == Some(LOGIN_PASS) {
            let answer = args.first().copied().unwrap_or_default();
            if answer.is_empty() {
                return Ok(Execution::silent());
            }
            return Ok(self.submit(answer, env));
        }

        if let Some(user) = &env.state.session {
            return Ok(Execution::ready(format!(
                "You are already logged in as {}. Use `logout` first.",
                user.username
            )));
        }
        let Some(email) = email_arg(args, options) else {
            return Err(TermError::Command(format!("Usage: {}", self.usage())));
        };
        env.state
            .prompt
            .begin(self.name(), LOGIN_PASS, PASSWORD, vec![email.to_string()]);
        Ok(Execution::silent())
    }
}

// ---------------------------------------------------------------------------
// register
// ---------------------------------------------------------------------------

struct RegisterCmd;

impl RegisterCmd {
    fn confirm(&self, password: &str, env: &mut Environment<'_>) -> Execution {
        let matches = env.state.prompt.answers().get(1).map(String::as_str) == Some(password);
        if !matches {
            env.state.prompt.rollback(REGISTER_PASS_1, PASSWORD);
            return Execution::ready("Passwords do not match. Please try again.");
        }
        let mut answers = env.state.prompt.finish().into_iter();
        let (Some(email), Some(password)) = (answers.next(), answers.next()) else {
            return Execution::silent();
        };
        let auth = Arc::clone(env.auth);
        Execution::pending(async move {
            let result = auth.register(&email, &password).await;
            completion(move |_env: &mut Environment<'_>| match result {
                Ok(message) => {
                    log::info!("registered a new account");
                    Output::Line(message)
                },
                Err(e) => {
                    log::warn!("registration failed: {e}");
                    auth_error(e)
                },
            })
        })
    }
}

impl Command for RegisterCmd {
    fn name(&self) -> &str {
        "register"
    }
    fn description(&self) -> &str {
        "Create an account. You will be asked to choose and confirm a password."
    }
    fn usage(&self) -> &str {
        "register -u <email>"
    }
    fn execute(&self, args: &[&str], options: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        if let Some(step) = env.state.prompt.step_for(self.name()) {
            let answer = args.first().copied().unwrap_or_default();
            if answer.is_empty() {
                return Ok(Execution::silent());
            }
            if step == REGISTER_PASS_2 {
                return Ok(self.confirm(answer, env));
            }
            env.state
                .prompt
                .advance(REGISTER_PASS_2, CONFIRM_PASSWORD, answer.to_string());
            return Ok(Execution::silent());
        }

        let Some(email) = email_arg(args, options) else {
            return Err(TermError::Command(format!("Usage: {}", self.usage())));
        };
        env.state
            .prompt
            .begin(self.name(), REGISTER_PASS_1, PASSWORD, vec![email.to_string()]);
        Ok(Execution::silent())
    }
}

// ---------------------------------------------------------------------------
// logout
// ---------------------------------------------------------------------------

struct LogoutCmd;
impl Command for LogoutCmd {
    fn name(&self) -> &str {
        "logout"
    }
    fn description(&self) -> &str {
        "Log out of the current session."
    }
    fn usage(&self) -> &str {
        "logout"
    }
    fn args_allowed(&self) -> bool {
        false
    }
    fn execute(&self, _args: &[&str], _: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        let Some(username) = env.state.session.as_ref().map(|u| u.username.clone()) else {
            return Ok(Execution::ready("You are not logged in."));
        };
        env.tokens.clear()?;
        env.state.session = None;
        log::info!("{username} logged out");
        Ok(Execution::ready(format!("Goodbye, {username}. You have been logged out.")))
    }
}

// ---------------------------------------------------------------------------
// verify
// ---------------------------------------------------------------------------

struct VerifyCmd;
impl Command for VerifyCmd {
    fn name(&self) -> &str {
        "verify"
    }
    fn description(&self) -> &str {
        "Verify your email address with the token from the confirmation mail."
    }
    fn usage(&self) -> &str {
        "verify <token>"
    }
    fn execute(&self, args: &[&str], _: &Options, env: &mut Environment<'_>) -> Result<Execution> {
        let Some(token) = args.first().filter(|t| !t.is_empty()) else {
            return Err(TermError::Command(format!("Usage: {}", self.usage())));
        };
        let token = token.to_string();
        let auth = Arc::clone(env.auth);
        Ok(Execution::pending(async move {
            let result = auth.verify(&token).await;
            completion(move |_env: &mut Environment<'_>| match result {
                Ok(message) => Output::Line(message),
                Err(e) => {
                    log::warn!("verification failed: {e}");
                    auth_error(e)
                },
            })
        }))
    }
}
