//! Sign-up, login and logout handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info};

use crate::auth::{authenticate, register, LoginError, RegistrationRequest};
use crate::db::{SessionRepository, User, UserRepository};
use crate::web::csrf::CsrfToken;
use crate::web::error::WebError;
use crate::web::forms::{form_or_default, FormErrors, LoginForm, LogoutForm, SignUpForm};
use crate::web::middleware::{session_cookie, session_removal_cookie, CurrentUser, SESSION_COOKIE};
use crate::web::templates::{LoginTemplate, PageContext, SignUpTemplate};

use super::{render, AppState};

/// Create a session for the user and attach its cookie.
///
/// Expired sessions are purged on the way.
async fn sign_in(state: &AppState, jar: CookieJar, user: &User) -> Result<CookieJar, WebError> {
    let sessions = SessionRepository::new(state.db.pool());
    let purged = sessions.purge_expired().await?;
    if purged > 0 {
        info!(count = purged, "purged expired sessions");
    }

    let session = sessions.create(user.id, state.session_ttl_days).await?;
    Ok(jar.add(session_cookie(
        session.token,
        state.session_ttl_days,
        state.secure_cookies,
    )))
}

fn signup_page(
    state: &AppState,
    csrf: CsrfToken,
    username: Option<String>,
    form: SignUpForm,
    errors: FormErrors,
) -> Result<Response, WebError> {
    let template = SignUpTemplate {
        page: PageContext::new(state, username, &csrf.token),
        form,
        errors,
    };
    Ok((csrf.jar, render(&template)?).into_response())
}

/// GET /signup/ - Show the sign-up form.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    csrf: CsrfToken,
    user: CurrentUser,
) -> Result<Response, WebError> {
    signup_page(
        &state,
        csrf,
        user.username(),
        SignUpForm::default(),
        FormErrors::new(),
    )
}

/// POST /signup/ - Create an account and sign in.
pub async fn signup_submit(
    State(state): State<Arc<AppState>>,
    csrf: CsrfToken,
    user: CurrentUser,
    form: Result<Form<SignUpForm>, FormRejection>,
) -> Result<Response, WebError> {
    let form = form_or_default(form);
    csrf.verify(&form.csrfmiddlewaretoken)?;

    let mut errors = FormErrors::validate(&form);
    if errors.is_empty() {
        let request = RegistrationRequest::new(&form.username, &form.email, &form.password1)
            .with_confirmation(&form.password2);
        match register(&UserRepository::new(state.db.pool()), request).await {
            Ok(new_user) => {
                let jar = sign_in(&state, csrf.jar, &new_user).await?;
                return Ok((jar, Redirect::to("/")).into_response());
            }
            Err(e) => {
                if !errors.add_registration_error(&e) {
                    error!(error = %e, "registration failed");
                    return Err(WebError::internal());
                }
            }
        }
    }

    // Passwords are never echoed back.
    let form = SignUpForm {
        username: form.username,
        email: form.email,
        ..Default::default()
    };
    signup_page(&state, csrf, user.username(), form, errors)
}

fn login_page(
    state: &AppState,
    csrf: CsrfToken,
    current: Option<String>,
    username: String,
    errors: FormErrors,
) -> Result<Response, WebError> {
    let template = LoginTemplate {
        page: PageContext::new(state, current, &csrf.token),
        username,
        errors,
    };
    Ok((csrf.jar, render(&template)?).into_response())
}

/// GET /login/ - Show the login form.
pub async fn login(
    State(state): State<Arc<AppState>>,
    csrf: CsrfToken,
    user: CurrentUser,
) -> Result<Response, WebError> {
    login_page(&state, csrf, user.username(), String::new(), FormErrors::new())
}

/// POST /login/ - Check credentials and sign in.
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    csrf: CsrfToken,
    user: CurrentUser,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, WebError> {
    let form = form_or_default(form);
    csrf.verify(&form.csrfmiddlewaretoken)?;

    let mut errors = FormErrors::validate(&form);
    if errors.is_empty() {
        let repo = UserRepository::new(state.db.pool());
        match authenticate(&repo, &form.username, &form.password).await {
            Ok(account) => {
                let jar = sign_in(&state, csrf.jar, &account).await?;
                return Ok((jar, Redirect::to("/")).into_response());
            }
            Err(e @ LoginError::InvalidCredentials) => errors.add_non_field(e.to_string()),
            Err(LoginError::Database(e)) => {
                error!(error = %e, "login failed");
                return Err(WebError::internal());
            }
        }
    }

    login_page(&state, csrf, user.username(), form.username, errors)
}

/// POST /logout/ - End the current session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    csrf: CsrfToken,
    form: Result<Form<LogoutForm>, FormRejection>,
) -> Result<Response, WebError> {
    let form = form_or_default(form);
    csrf.verify(&form.csrfmiddlewaretoken)?;

    let mut jar = csrf.jar;
    if let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
        if SessionRepository::new(state.db.pool()).delete(&token).await? {
            info!("user logged out");
        }
        jar = jar.remove(session_removal_cookie());
    }

    Ok((jar, Redirect::to("/")).into_response())
}
