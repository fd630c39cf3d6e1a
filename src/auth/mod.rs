mod requests;
mod responses;
pub mod utils;

use crate::{
    database::{self, get_db_conn},
    models::{
        auth_config::{AuthConfig, DRIVER_USER},
        driver_logins::DriverLoginData,
    },
    protocol::SimpleResponse,
    utils::{generate_login_token, hash_secret},
    AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use self::{
    requests::*,
    responses::*,
    utils::{encode_pattern, get_user_from_token, pick_credential, Credential},
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(logout)
        .service(pattern_status)
        .service(setup_pattern);
}

crate::post_funcs! {
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
    (pattern_status, "/pattern_status", PatternStatusRequest, PatternStatusResponse),
    (setup_pattern, "/setup_pattern", SetupPatternRequest, SimpleResponse),
}

async fn login_impl(
    state: web::Data<AppState>,
    info: web::Json<LoginRequest>,
) -> anyhow::Result<LoginResponse> {
    use crate::schema::{auth_config, driver_logins};

    let info = info.into_inner();
    let driver_password = state.config.driver_password.clone();

    let credential = pick_credential(info.password, info.pattern)?;

    let conn = get_db_conn(&state)?;
    let login_token = database::block(move || {
        conn.transaction(|| {
            match credential {
                Credential::Password(password) => {
                    if password != driver_password {
                        bail!("Invalid password");
                    }
                }
                Credential::Pattern(pattern) => {
                    let stored = auth_config::table
                        .filter(auth_config::user.eq(DRIVER_USER))
                        .get_result::<AuthConfig>(&conn)
                        .optional()
                        .context("DB error")?
                        .and_then(|data| data.pattern);
                    let stored = match stored {
                        Some(stored) => stored,
                        None => bail!("Pattern not set up"),
                    };
                    let given = encode_pattern(&pattern).map(hash_secret);
                    if given.ok().as_deref() != Some(stored.as_str()) {
                        bail!("Invalid pattern");
                    }
                }
            }

            let login_token = generate_login_token(DRIVER_USER);
            let token_data = DriverLoginData {
                token: login_token.clone(),
                user: DRIVER_USER.to_string(),
                login_time: Utc::now().naive_utc(),
            };
            diesel::insert_into(driver_logins::table)
                .values(token_data)
                .execute(&conn)
                .context("DB error")?;

            Ok(login_token)
        })
    })
    .await?;

    tracing::info!("driver logged in");
    Ok(LoginResponse {
        success: true,
        err: "".to_string(),
        login_token,
    })
}

async fn logout_impl(
    state: web::Data<AppState>,
    info: web::Json<LogoutRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::driver_logins;

    let info = info.into_inner();
    let conn = get_db_conn(&state)?;
    web::block(move || {
        diesel::delete(driver_logins::table.filter(driver_logins::token.eq(info.login_token)))
            .execute(&conn)
    })
    .await
    .context("DB error")?;

    Ok(SimpleResponse::ok())
}

async fn pattern_status_impl(
    state: web::Data<AppState>,
    _info: web::Json<PatternStatusRequest>,
) -> anyhow::Result<PatternStatusResponse> {
    use crate::schema::auth_config;

    let conn = get_db_conn(&state)?;
    let res = web::block(move || {
        auth_config::table
            .filter(auth_config::user.eq(DRIVER_USER))
            .filter(auth_config::pattern.is_not_null())
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    Ok(PatternStatusResponse {
        success: true,
        err: "".to_string(),
        has_pattern: res > 0,
    })
}

async fn setup_pattern_impl(
    state: web::Data<AppState>,
    info: web::Json<SetupPatternRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::auth_config;

    let info = info.into_inner();
    let user = get_user_from_token(info.login_token, &state).await?;
    let hashed_pattern = hash_secret(encode_pattern(&info.pattern)?);

    let conn = get_db_conn(&state)?;
    database::block(move || {
        conn.transaction(|| {
            let now = Utc::now().naive_utc();
            let res = auth_config::table
                .filter(auth_config::user.eq(&user))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;

            if res == 0 {
                let data = AuthConfig {
                    user,
                    pattern: Some(hashed_pattern),
                    updated_at: now,
                };
                diesel::insert_into(auth_config::table)
                    .values(data)
                    .execute(&conn)
                    .context("DB error")?;
            } else {
                diesel::update(auth_config::table.filter(auth_config::user.eq(&user)))
                    .set((
                        auth_config::pattern.eq(Some(hashed_pattern)),
                        auth_config::updated_at.eq(now),
                    ))
                    .execute(&conn)
                    .context("DB error")?;
            }

            Ok(())
        })
    })
    .await?;

    tracing::info!("unlock pattern updated");
    Ok(SimpleResponse::ok())
}
