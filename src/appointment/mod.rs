mod requests;
mod responses;

use crate::{
    auth::utils::get_user_from_token,
    database::{self, assert, get_db_conn, last_insert_id},
    models::{
        appointment_types::AppointmentType,
        appointments::{
            check_amount, Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
        },
    },
    overlap::{self, Booked, CandidateWindow, Draft, Verdict},
    protocol::SimpleResponse,
    report::{income, sms},
    utils::{get_str_pattern, non_empty, parse_time_str, parse_time_str_lenient},
    AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

const DEFAULT_SEARCH_LIMIT: i64 = 1000;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add)
        .service(view)
        .service(modify)
        .service(delete)
        .service(search)
        .service(check)
        .service(income_stats)
        .service(upcoming)
        .service(sms_preview);
}

crate::post_funcs! {
    (add, "/add", AddAppointmentRequest, SaveAppointmentResponse),
    (view, "/view", ViewAppointmentRequest, ViewAppointmentResponse),
    (modify, "/modify", ModifyAppointmentRequest, SaveAppointmentResponse),
    (delete, "/delete", DeleteAppointmentRequest, SimpleResponse),
    (search, "/search", SearchAppointmentRequest, SearchAppointmentResponse),
    (check, "/check", CheckAppointmentRequest, CheckAppointmentResponse),
    (income_stats, "/income_stats", IncomeStatsRequest, IncomeStatsResponse),
    (upcoming, "/upcoming", UpcomingRequest, UpcomingResponse),
    (sms_preview, "/sms", SmsRequest, SmsResponse),
}

fn required(field: &str, value: String) -> anyhow::Result<String> {
    match non_empty(Some(value)) {
        Some(value) => Ok(value),
        None => bail!("{} is required", field),
    }
}

/// Stored appointments that could overlap the draft.
fn overlap_candidates(conn: &MysqlConnection, draft: &Draft) -> anyhow::Result<Vec<Booked>> {
    use crate::schema::appointments;

    let window = match CandidateWindow::for_draft(draft) {
        Some(window) => window,
        None => return Ok(Vec::new()),
    };

    let rows = appointments::table
        .filter(appointments::pickup_time.lt(window.pickup_before))
        .filter(appointments::arrival_time.gt(window.arrival_after))
        .get_results::<Appointment>(conn)
        .context("DB error")?;

    Ok(rows.iter().map(Appointment::booked).collect())
}

fn check_draft(conn: &MysqlConnection, draft: &Draft) -> anyhow::Result<Verdict> {
    let others = overlap_candidates(conn, draft)?;
    Ok(overlap::check(draft, &others))
}

fn log_overlap(id: u64, verdict: &Verdict) {
    if verdict.overlap() {
        tracing::warn!(
            id,
            overlapping = ?verdict.overlapping,
            "appointment overlaps existing appointments"
        );
    }
}

async fn add_impl(
    state: web::Data<AppState>,
    info: web::Json<AddAppointmentRequest>,
) -> anyhow::Result<SaveAppointmentResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    get_user_from_token(info.login_token.clone(), &state).await?;

    let settings = &state.config.display;
    let pickup_time =
        parse_time_str(&info.pickup_time, settings).context("Invalid pickup time")?;
    let arrival_time =
        parse_time_str(&info.arrival_time, settings).context("Invalid arrival time")?;
    let status = match info.status {
        Some(status) => status.parse::<AppointmentStatus>()?,
        None => AppointmentStatus::default(),
    };

    let now = Utc::now().naive_utc();
    let data = NewAppointment {
        client_name: required("Client name", info.client_name)?,
        pickup_time,
        pickup_location: required("Pickup location", info.pickup_location)?,
        arrival_time,
        arrival_location: required("Arrival location", info.arrival_location)?,
        appointment_type_id: info.appointment_type_id,
        flight_info: non_empty(info.flight_info),
        luggage_passengers: non_empty(info.luggage_passengers),
        other_details: non_empty(info.other_details),
        amount: check_amount(info.amount)?,
        status: status.as_str().to_string(),
        created_at: now,
        updated_at: now,
    };
    let draft = Draft {
        id: None,
        pickup: Some(pickup_time),
        arrival: Some(arrival_time),
    };

    let conn = get_db_conn(&state)?;
    let (id, verdict) = database::block(move || {
        conn.transaction(|| {
            assert::assert_appointment_type(&conn, data.appointment_type_id)?;

            let verdict = check_draft(&conn, &draft)?;
            verdict.ensure_valid()?;

            diesel::insert_into(appointments::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;
            let id = diesel::select(last_insert_id)
                .get_result::<u64>(&conn)
                .context("DB error")?;

            Ok((id, verdict))
        })
    })
    .await?;

    tracing::info!(id, "appointment added");
    log_overlap(id, &verdict);
    Ok(SaveAppointmentResponse {
        success: true,
        err: "".to_string(),
        id,
        overlap: verdict.overlap(),
        overlapping_ids: verdict.overlapping,
    })
}

async fn view_impl(
    state: web::Data<AppState>,
    info: web::Json<ViewAppointmentRequest>,
) -> anyhow::Result<ViewAppointmentResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let id = info.id;
    let conn = get_db_conn(&state)?;
    let appo = web::block(move || {
        appointments::table
            .filter(appointments::id.eq(id))
            .get_result::<Appointment>(&conn)
            .optional()
    })
    .await
    .context("DB error")?;

    let appo = match appo {
        Some(appo) => appo,
        None => bail!("No such appointment"),
    };

    Ok(ViewAppointmentResponse {
        success: true,
        err: "".to_string(),
        appointment: AppointmentItem::new(appo, &state.config.display),
    })
}

async fn modify_impl(
    state: web::Data<AppState>,
    info: web::Json<ModifyAppointmentRequest>,
) -> anyhow::Result<SaveAppointmentResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    get_user_from_token(info.login_token.clone(), &state).await?;

    let settings = &state.config.display;
    let mut data = UpdateAppointment {
        pickup_time: info
            .pickup_time
            .map(|t| parse_time_str(t, settings).context("Invalid pickup time"))
            .transpose()?,
        arrival_time: info
            .arrival_time
            .map(|t| parse_time_str(t, settings).context("Invalid arrival time"))
            .transpose()?,
        appointment_type_id: info.appointment_type_id,
        flight_info: info.flight_info.map(|s| s.trim().to_string()),
        luggage_passengers: info.luggage_passengers.map(|s| s.trim().to_string()),
        other_details: info.other_details.map(|s| s.trim().to_string()),
        amount: info.amount.map(check_amount).transpose()?,
        updated_at: Some(Utc::now().naive_utc()),
        ..Default::default()
    };
    if let Some(client_name) = info.client_name {
        data.client_name = Some(required("Client name", client_name)?);
    }
    if let Some(pickup_location) = info.pickup_location {
        data.pickup_location = Some(required("Pickup location", pickup_location)?);
    }
    if let Some(arrival_location) = info.arrival_location {
        data.arrival_location = Some(required("Arrival location", arrival_location)?);
    }
    if let Some(status) = info.status {
        data.status = Some(status.parse::<AppointmentStatus>()?.as_str().to_string());
    }

    let id = info.id;
    let conn = get_db_conn(&state)?;
    let verdict = database::block(move || {
        conn.transaction(|| {
            let existing = appointments::table
                .filter(appointments::id.eq(id))
                .get_result::<Appointment>(&conn)
                .optional()
                .context("DB error")?;
            let existing = match existing {
                Some(existing) => existing,
                None => bail!("No such appointment"),
            };
            if let Some(type_id) = data.appointment_type_id {
                assert::assert_appointment_type(&conn, type_id)?;
            }

            let draft = Draft::edit(
                id,
                &existing.booked().span,
                data.pickup_time,
                data.arrival_time,
            );
            let verdict = check_draft(&conn, &draft)?;
            verdict.ensure_valid()?;

            diesel::update(appointments::table.filter(appointments::id.eq(id)))
                .set(&data)
                .execute(&conn)
                .context("DB error")?;

            Ok(verdict)
        })
    })
    .await?;

    log_overlap(id, &verdict);
    Ok(SaveAppointmentResponse {
        success: true,
        err: "".to_string(),
        id,
        overlap: verdict.overlap(),
        overlapping_ids: verdict.overlapping,
    })
}

async fn delete_impl(
    state: web::Data<AppState>,
    info: web::Json<DeleteAppointmentRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let id = info.id;
    let conn = get_db_conn(&state)?;
    database::block(move || {
        conn.transaction(|| {
            assert::assert_appointment(&conn, id)?;
            diesel::delete(appointments::table.filter(appointments::id.eq(id)))
                .execute(&conn)
                .context("DB error")?;
            Ok(())
        })
    })
    .await?;

    tracing::info!(id, "appointment deleted");
    Ok(SimpleResponse::ok())
}

async fn search_impl(
    state: web::Data<AppState>,
    info: web::Json<SearchAppointmentRequest>,
) -> anyhow::Result<SearchAppointmentResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let status = match non_empty(info.status) {
        Some(status) => Some(status.parse::<AppointmentStatus>()?),
        None => None,
    };
    let day = match non_empty(info.date) {
        Some(date) => Some(
            state
                .config
                .display
                .day_bounds(crate::utils::parse_date_str(date)?)?,
        ),
        None => None,
    };
    let client_pattern = non_empty(info.client_name).map(get_str_pattern);
    let keyword_pattern = non_empty(info.keyword).map(get_str_pattern);
    let type_id = info.appointment_type_id;
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).max(0);

    let conn = get_db_conn(&state)?;
    let appos = web::block(move || {
        let mut query = appointments::table.into_boxed();
        if let Some(status) = status {
            query = query.filter(appointments::status.eq(status.as_str()));
        }
        if let Some((start_time, end_time)) = day {
            query = query.filter(appointments::pickup_time.between(start_time, end_time));
        }
        if let Some(pattern) = client_pattern {
            query = query.filter(appointments::client_name.like(pattern));
        }
        if let Some(pattern) = keyword_pattern {
            query = query.filter(
                appointments::client_name
                    .like(pattern.clone())
                    .or(appointments::pickup_location.like(pattern.clone()))
                    .or(appointments::arrival_location.like(pattern)),
            );
        }
        if let Some(type_id) = type_id {
            query = query.filter(appointments::appointment_type_id.eq(type_id));
        }
        query
            .order((appointments::pickup_time.asc(), appointments::id.asc()))
            .offset(first_index)
            .limit(limit)
            .get_results::<Appointment>(&conn)
    })
    .await
    .context("DB error")?;

    Ok(SearchAppointmentResponse {
        success: true,
        err: "".to_string(),
        appointments: appos
            .into_iter()
            .map(|appo| AppointmentItem::new(appo, &state.config.display))
            .collect(),
    })
}

async fn check_impl(
    state: web::Data<AppState>,
    info: web::Json<CheckAppointmentRequest>,
) -> anyhow::Result<CheckAppointmentResponse> {
    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let settings = &state.config.display;
    let draft = Draft {
        id: info.id,
        pickup: parse_time_str_lenient(info.pickup_time, settings),
        arrival: parse_time_str_lenient(info.arrival_time, settings),
    };

    let conn = get_db_conn(&state)?;
    let verdict = database::block(move || check_draft(&conn, &draft)).await?;

    Ok(CheckAppointmentResponse {
        success: true,
        err: "".to_string(),
        valid: verdict.valid(),
        reason: verdict
            .invalid
            .as_ref()
            .map(|err| err.to_string())
            .unwrap_or_default(),
        overlap: verdict.overlap(),
        overlapping_ids: verdict.overlapping,
    })
}

async fn income_stats_impl(
    state: web::Data<AppState>,
    info: web::Json<IncomeStatsRequest>,
) -> anyhow::Result<IncomeStatsResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let (start_time, end_time) = crate::utils::get_time_pair_from_dates_opt(
        non_empty(info.start_date),
        non_empty(info.end_date),
        &state.config.display,
    )?;
    let client_pattern = non_empty(info.client_name).map(get_str_pattern);
    let type_id = info.appointment_type_id;

    let conn = get_db_conn(&state)?;
    let appos = web::block(move || {
        let mut query = appointments::table
            .filter(appointments::status.eq(AppointmentStatus::Completed.as_str()))
            .filter(appointments::pickup_time.between(start_time, end_time))
            .into_boxed();
        if let Some(pattern) = client_pattern {
            query = query.filter(appointments::client_name.like(pattern));
        }
        if let Some(type_id) = type_id {
            query = query.filter(appointments::appointment_type_id.eq(type_id));
        }
        query.get_results::<Appointment>(&conn)
    })
    .await
    .context("DB error")?;

    let stats = income::summarize(&appos);
    Ok(IncomeStatsResponse {
        success: true,
        err: "".to_string(),
        total_income: stats.total_income,
        total_count: stats.total_count,
        average_income: stats.average_income,
        by_client: stats
            .by_client
            .into_iter()
            .map(|c| ClientIncomeItem {
                client_name: c.client_name,
                count: c.count,
                total: c.total,
            })
            .collect(),
    })
}

async fn upcoming_impl(
    state: web::Data<AppState>,
    info: web::Json<UpcomingRequest>,
) -> anyhow::Result<UpcomingResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let now = Utc::now().naive_utc();
    let conn = get_db_conn(&state)?;
    let count = web::block(move || {
        appointments::table
            .filter(appointments::status.eq(AppointmentStatus::Scheduled.as_str()))
            .filter(appointments::pickup_time.gt(now))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    Ok(UpcomingResponse {
        success: true,
        err: "".to_string(),
        count,
    })
}

async fn sms_preview_impl(
    state: web::Data<AppState>,
    info: web::Json<SmsRequest>,
) -> anyhow::Result<SmsResponse> {
    use crate::schema::{appointment_types, appointments};

    let info = info.into_inner();
    get_user_from_token(info.login_token, &state).await?;

    let settings = state
        .config
        .display
        .with_overrides(
            non_empty(info.language).as_deref(),
            non_empty(info.date_format).as_deref(),
        )?;

    let id = info.id;
    let conn = get_db_conn(&state)?;
    let (appo, appo_type, fields) = database::block(move || {
        let appo = appointments::table
            .filter(appointments::id.eq(id))
            .get_result::<Appointment>(&conn)
            .optional()
            .context("DB error")?;
        let appo = match appo {
            Some(appo) => appo,
            None => bail!("No such appointment"),
        };
        let appo_type = appointment_types::table
            .filter(appointment_types::id.eq(appo.appointment_type_id))
            .get_result::<AppointmentType>(&conn)
            .optional()
            .context("DB error")?;
        let fields = crate::sms_template::load_fields(&conn)?;
        Ok((appo, appo_type, fields))
    })
    .await?;

    let content = sms::render(
        &appo,
        appo_type.as_ref().map(|t| t.name.as_str()),
        &fields,
        &settings,
    );

    Ok(SmsResponse {
        success: true,
        err: "".to_string(),
        content,
    })
}
