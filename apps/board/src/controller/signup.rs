//! Signup submission handler for `#signup-form`.

use client_core::{ClientError, FailureKind};
use tracing::{debug, error, info, warn};

use super::{context::BoardContext, events::UiEvent, render::render};
use crate::ui::{FormError, SignupSubmission, StatusKind};

pub const SIGNUP_FALLBACK: &str = "An error occurred";
pub const SIGNUP_RETRY: &str = "Failed to sign up. Please try again.";

/// Submits whatever the signup form currently holds.
pub async fn submit_form(ctx: &BoardContext) -> UiEvent {
    let submission = ctx.page().lock().await.signup_form.submission();
    match submission {
        Ok(submission) => submit_signup(ctx, submission).await,
        Err(reason) => block_submit(ctx, reason).await,
    }
}

async fn block_submit(ctx: &BoardContext, reason: FormError) -> UiEvent {
    info!(%reason, "signup form blocked by input constraints");
    let mut page = ctx.page().lock().await;
    ctx.flash_status(&mut page, StatusKind::Error, reason.to_string());
    UiEvent::SignupInvalid { reason }
}

/// Signs `submission.email` up for `submission.activity`.
///
/// Success shows the server message, resets the form and re-renders the
/// list. Failures show an error status and keep the form as typed. Every
/// outcome hides its status after the context's hide delay. Input the form
/// would not have submitted is reported without any request.
pub async fn submit_signup(ctx: &BoardContext, submission: SignupSubmission) -> UiEvent {
    if let Err(reason) = submission.validate() {
        return block_submit(ctx, reason).await;
    }
    let SignupSubmission { email, activity } = submission;

    match ctx.api().signup(&activity, &email).await {
        Ok(response) => {
            {
                let mut page = ctx.page().lock().await;
                ctx.flash_status(&mut page, StatusKind::Success, response.message.clone());
                page.signup_form.reset();
            }
            let refresh = render(ctx).await;
            debug!(?refresh, "refreshed activities after signup");
            UiEvent::SignedUp {
                activity,
                email,
                message: response.message,
            }
        }
        Err(ClientError::Rejected(rejection)) => {
            warn!(
                %email,
                %activity,
                status = rejection.status,
                detail = ?rejection.detail,
                "signup rejected"
            );
            let message = rejection.detail_or(SIGNUP_FALLBACK).to_string();
            let mut page = ctx.page().lock().await;
            ctx.flash_status(&mut page, StatusKind::Error, message.clone());
            UiEvent::SignupFailed {
                activity,
                email,
                kind: FailureKind::Rejected,
                message,
            }
        }
        Err(error) => {
            error!(%error, %email, %activity, "error signing up");
            let mut page = ctx.page().lock().await;
            ctx.flash_status(&mut page, StatusKind::Error, SIGNUP_RETRY);
            UiEvent::SignupFailed {
                activity,
                email,
                kind: error.kind(),
                message: SIGNUP_RETRY.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/signup_tests.rs"]
mod tests;
