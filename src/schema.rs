table! {
    appointment_types (id) {
        id -> Unsigned<Bigint>,
        name -> Varchar,
        color -> Char,
        icon -> Varchar,
        created_at -> Datetime,
    }
}

table! {
    appointments (id) {
        id -> Unsigned<Bigint>,
        client_name -> Varchar,
        pickup_time -> Datetime,
        pickup_location -> Varchar,
        arrival_time -> Datetime,
        arrival_location -> Varchar,
        appointment_type_id -> Unsigned<Bigint>,
        flight_info -> Nullable<Varchar>,
        luggage_passengers -> Nullable<Varchar>,
        other_details -> Nullable<Text>,
        amount -> Double,
        status -> Varchar,
        created_at -> Datetime,
        updated_at -> Datetime,
    }
}

table! {
    auth_config (user) {
        user -> Varchar,
        pattern -> Nullable<Char>,
        updated_at -> Datetime,
    }
}

table! {
    driver_logins (token, user, login_time) {
        token -> Char,
        user -> Varchar,
        login_time -> Datetime,
    }
}

table! {
    sms_templates (id) {
        id -> Unsigned<Integer>,
        fields -> Varchar,
        updated_at -> Datetime,
    }
}

joinable!(appointments -> appointment_types (appointment_type_id));

allow_tables_to_appear_in_same_query!(
    appointment_types,
    appointments,
    auth_config,
    driver_logins,
    sms_templates,
);
