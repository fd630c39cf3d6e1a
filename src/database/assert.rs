use anyhow::{bail, Context};
use diesel::prelude::*;

pub fn assert_appointment(conn: &MysqlConnection, id: u64) -> anyhow::Result<()> {
    use crate::schema::appointments;

    let res = appointments::table
        .filter(appointments::id.eq(id))
        .count()
        .get_result::<i64>(conn)
        .context("DB error")?;

    if res == 0 {
        bail!("No such appointment");
    }

    Ok(())
}

pub fn assert_appointment_type(conn: &MysqlConnection, id: u64) -> anyhow::Result<()> {
    use crate::schema::appointment_types;

    let res = appointment_types::table
        .filter(appointment_types::id.eq(id))
        .count()
        .get_result::<i64>(conn)
        .context("DB error")?;

    if res == 0 {
        bail!("No such appointment type");
    }

    Ok(())
}

pub fn assert_type_unused(conn: &MysqlConnection, id: u64) -> anyhow::Result<()> {
    use crate::schema::appointments;

    let res = appointments::table
        .filter(appointments::appointment_type_id.eq(id))
        .count()
        .get_result::<i64>(conn)
        .context("DB error")?;

    if res > 0 {
        bail!("Cannot delete: {} appointments still use this type", res);
    }

    Ok(())
}
