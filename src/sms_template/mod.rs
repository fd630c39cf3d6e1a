mod requests;
mod responses;

use crate::{
    auth::utils::get_user_from_token,
    database::{self, get_db_conn},
    models::sms_templates::{SmsTemplateData, TEMPLATE_ID},
    protocol::SimpleResponse,
    report::sms::{self, SmsField, ALL_FIELDS},
    AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::Context;
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(view).service(modify);
}

crate::post_funcs! {
    (view, "/view", ViewTemplateRequest, ViewTemplateResponse),
    (modify, "/modify", ModifyTemplateRequest, SimpleResponse),
}

/// The stored field list, or every field when nothing is stored yet.
pub fn load_fields(conn: &MysqlConnection) -> anyhow::Result<Vec<SmsField>> {
    use crate::schema::sms_templates;

    let stored = sms_templates::table
        .filter(sms_templates::id.eq(TEMPLATE_ID))
        .get_result::<SmsTemplateData>(conn)
        .optional()
        .context("DB error")?;

    match stored {
        Some(data) => sms::split_fields(&data.fields),
        None => Ok(ALL_FIELDS.to_vec()),
    }
}

async fn view_impl(
    state: web::Data<AppState>,
    info: web::Json<ViewTemplateRequest>,
) -> anyhow::Result<ViewTemplateResponse> {
    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let conn = get_db_conn(&state)?;
    let fields = database::block(move || load_fields(&conn)).await?;

    let language = state.config.display.language;
    Ok(ViewTemplateResponse {
        success: true,
        err: "".to_string(),
        greeting: sms::greeting(language).to_string(),
        fields: fields.iter().map(|f| f.as_str().to_string()).collect(),
        closing: sms::closing(language).to_string(),
    })
}

async fn modify_impl(
    state: web::Data<AppState>,
    info: web::Json<ModifyTemplateRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::sms_templates;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let fields = sms::join_fields(&sms::normalize_fields(&info.fields)?);

    let conn = get_db_conn(&state)?;
    database::block(move || {
        conn.transaction(|| {
            let now = Utc::now().naive_utc();
            let res = sms_templates::table
                .filter(sms_templates::id.eq(TEMPLATE_ID))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;

            if res == 0 {
                let data = SmsTemplateData {
                    id: TEMPLATE_ID,
                    fields,
                    updated_at: now,
                };
                diesel::insert_into(sms_templates::table)
                    .values(data)
                    .execute(&conn)
                    .context("DB error")?;
            } else {
                diesel::update(sms_templates::table.filter(sms_templates::id.eq(TEMPLATE_ID)))
                    .set((
                        sms_templates::fields.eq(fields),
                        sms_templates::updated_at.eq(now),
                    ))
                    .execute(&conn)
                    .context("DB error")?;
            }

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}
