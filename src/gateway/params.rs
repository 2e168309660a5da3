//! Provider call parameters.
//!
//! Each builder is a pure function of the request and the app client id.

use super::requests::{
    ChangePasswordRequest, ConfirmForgotPasswordRequest, ConfirmSignUpRequest,
    ForgotPasswordRequest, ResendConfirmationCodeRequest, SignInRequest, SignUpRequest,
};
use serde_json::{Value, json};

const PASSWORD_AUTH_FLOW: &str = "USER_PASSWORD_AUTH";

pub(super) fn initiate_auth(client_id: &str, request: &SignInRequest) -> Value {
    json!({
        "AuthFlow": PASSWORD_AUTH_FLOW,
        "ClientId": client_id,
        "AuthParameters": {
            "USERNAME": request.email,
            "PASSWORD": request.password,
        },
    })
}

pub(super) fn sign_up(client_id: &str, request: &SignUpRequest) -> Value {
    json!({
        "ClientId": client_id,
        "Username": request.email,
        "Password": request.password,
        "UserAttributes": [
            { "Name": "email", "Value": request.email },
        ],
    })
}

pub(super) fn confirm_sign_up(client_id: &str, request: &ConfirmSignUpRequest) -> Value {
    json!({
        "ClientId": client_id,
        "ConfirmationCode": request.code,
        "Username": request.email,
    })
}

pub(super) fn forgot_password(client_id: &str, request: &ForgotPasswordRequest) -> Value {
    json!({
        "ClientId": client_id,
        "Username": request.email,
    })
}

pub(super) fn confirm_forgot_password(
    client_id: &str,
    request: &ConfirmForgotPasswordRequest,
) -> Value {
    json!({
        "ClientId": client_id,
        "ConfirmationCode": request.code,
        "Username": request.email,
        "Password": request.new_password,
    })
}

// ChangePassword is authorized by the user's access token, not the app client.
pub(super) fn change_password(request: &ChangePasswordRequest) -> Value {
    json!({
        "AccessToken": request.access_token,
        "PreviousPassword": request.old_password,
        "ProposedPassword": request.new_password,
    })
}

pub(super) fn resend_confirmation_code(
    client_id: &str,
    request: &ResendConfirmationCodeRequest,
) -> Value {
    json!({
        "ClientId": client_id,
        "Username": request.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initiate_auth_uses_password_flow() {
        let params = initiate_auth(
            "client-id",
            &SignInRequest {
                email: "a@b.com".to_string(),
                password: "Password123".to_string(),
            },
        );

        assert_eq!(
            params,
            json!({
                "AuthFlow": "USER_PASSWORD_AUTH",
                "ClientId": "client-id",
                "AuthParameters": { "USERNAME": "a@b.com", "PASSWORD": "Password123" }
            })
        );
    }

    #[test]
    fn sign_up_sets_email_attribute() {
        let params = sign_up(
            "client-id",
            &SignUpRequest {
                email: "a@b.com".to_string(),
                password: "Password123".to_string(),
            },
        );

        assert_eq!(
            params,
            json!({
                "ClientId": "client-id",
                "Username": "a@b.com",
                "Password": "Password123",
                "UserAttributes": [{ "Name": "email", "Value": "a@b.com" }]
            })
        );
    }

    #[test]
    fn change_password_has_no_client_id() {
        let params = change_password(&ChangePasswordRequest {
            access_token: "token".to_string(),
            old_password: "old".to_string(),
            new_password: "new".to_string(),
        });

        assert_eq!(
            params,
            json!({
                "AccessToken": "token",
                "PreviousPassword": "old",
                "ProposedPassword": "new"
            })
        );
    }

    #[test]
    fn confirm_forgot_password_maps_new_password() {
        let params = confirm_forgot_password(
            "client-id",
            &ConfirmForgotPasswordRequest {
                email: "a@b.com".to_string(),
                code: "123456".to_string(),
                new_password: "Password123".to_string(),
            },
        );

        assert_eq!(
            params,
            json!({
                "ClientId": "client-id",
                "ConfirmationCode": "123456",
                "Username": "a@b.com",
                "Password": "Password123"
            })
        );
    }

    #[test]
    fn email_only_requests_send_client_and_username() {
        let expected = json!({ "ClientId": "client-id", "Username": "a@b.com" });

        let params = forgot_password(
            "client-id",
            &ForgotPasswordRequest {
                email: "a@b.com".to_string(),
            },
        );
        assert_eq!(params, expected);

        let params = resend_confirmation_code(
            "client-id",
            &ResendConfirmationCodeRequest {
                email: "a@b.com".to_string(),
            },
        );
        assert_eq!(params, expected);
    }

    #[test]
    fn confirm_sign_up_sends_code_and_username() {
        let params = confirm_sign_up(
            "client-id",
            &ConfirmSignUpRequest {
                email: "a@b.com".to_string(),
                code: "123456".to_string(),
            },
        );

        assert_eq!(
            params,
            json!({
                "ClientId": "client-id",
                "ConfirmationCode": "123456",
                "Username": "a@b.com"
            })
        );
    }
}
