mod requests;
mod responses;

use crate::{
    auth::utils::get_user_from_token,
    database::{self, assert, get_db_conn, last_insert_id},
    models::appointment_types::{AppointmentType, NewAppointmentType, UpdateAppointmentType},
    palette::{self, TypeIcon},
    protocol::SimpleResponse,
    AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add)
        .service(search)
        .service(modify)
        .service(delete)
        .service(view_palette);
}

crate::post_funcs! {
    (add, "/add", AddTypeRequest, AddTypeResponse),
    (search, "/search", SearchTypeRequest, SearchTypeResponse),
    (modify, "/modify", ModifyTypeRequest, SimpleResponse),
    (delete, "/delete", DeleteTypeRequest, SimpleResponse),
    (view_palette, "/palette", PaletteRequest, PaletteResponse),
}

fn check_name(name: &str) -> anyhow::Result<String> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Type name must not be empty");
    }
    Ok(name.to_string())
}

async fn add_impl(
    state: web::Data<AppState>,
    info: web::Json<AddTypeRequest>,
) -> anyhow::Result<AddTypeResponse> {
    use crate::schema::appointment_types;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let icon = match info.icon {
        Some(icon) => icon.parse::<TypeIcon>()?,
        None => TypeIcon::default(),
    };
    let data = NewAppointmentType {
        name: check_name(&info.name)?,
        color: palette::parse_color(&info.color)?,
        icon: icon.as_str().to_string(),
        created_at: Utc::now().naive_utc(),
    };

    let conn = get_db_conn(&state)?;
    let id = database::block(move || {
        conn.transaction(|| {
            diesel::insert_into(appointment_types::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;
            diesel::select(last_insert_id)
                .get_result::<u64>(&conn)
                .context("DB error")
        })
    })
    .await?;

    tracing::info!(id, "appointment type added");
    Ok(AddTypeResponse {
        success: true,
        err: "".to_string(),
        id,
    })
}

async fn search_impl(
    state: web::Data<AppState>,
    info: web::Json<SearchTypeRequest>,
) -> anyhow::Result<SearchTypeResponse> {
    use crate::schema::appointment_types;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let conn = get_db_conn(&state)?;
    let types = web::block(move || {
        appointment_types::table
            .order((appointment_types::created_at.asc(), appointment_types::id.asc()))
            .get_results::<AppointmentType>(&conn)
    })
    .await
    .context("DB error")?;

    let types = types
        .into_iter()
        .map(|data| TypeItem {
            id: data.id,
            name: data.name,
            color: data.color,
            icon: data.icon,
            created_at: crate::utils::format_time_str(&data.created_at),
        })
        .collect();

    Ok(SearchTypeResponse {
        success: true,
        err: "".to_string(),
        types,
    })
}

async fn modify_impl(
    state: web::Data<AppState>,
    info: web::Json<ModifyTypeRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointment_types;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let mut data = UpdateAppointmentType::default();
    if let Some(name) = info.name {
        data.name = Some(check_name(&name)?);
    }
    if let Some(color) = info.color {
        data.color = Some(palette::parse_color(&color)?);
    }
    if let Some(icon) = info.icon {
        data.icon = Some(icon.parse::<TypeIcon>()?.as_str().to_string());
    }
    if data.is_empty() {
        bail!("Nothing to modify");
    }

    let id = info.id;
    let conn = get_db_conn(&state)?;
    database::block(move || {
        conn.transaction(|| {
            assert::assert_appointment_type(&conn, id)?;
            diesel::update(appointment_types::table.filter(appointment_types::id.eq(id)))
                .set(&data)
                .execute(&conn)
                .context("DB error")?;
            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn delete_impl(
    state: web::Data<AppState>,
    info: web::Json<DeleteTypeRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointment_types;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let id = info.id;
    let conn = get_db_conn(&state)?;
    database::block(move || {
        conn.transaction(|| {
            assert::assert_appointment_type(&conn, id)?;
            assert::assert_type_unused(&conn, id)?;
            diesel::delete(appointment_types::table.filter(appointment_types::id.eq(id)))
                .execute(&conn)
                .context("DB error")?;
            Ok(())
        })
    })
    .await?;

    tracing::info!(id, "appointment type deleted");
    Ok(SimpleResponse::ok())
}

async fn view_palette_impl(
    _state: web::Data<AppState>,
    _info: web::Json<PaletteRequest>,
) -> anyhow::Result<PaletteResponse> {
    Ok(PaletteResponse {
        success: true,
        err: "".to_string(),
        icons: palette::ALL_ICONS
            .iter()
            .map(|icon| icon.as_str().to_string())
            .collect(),
        colors: palette::PRESET_COLORS
            .iter()
            .map(|(name, value)| ColorItem {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect(),
    })
}
