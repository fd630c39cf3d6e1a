use std::collections::HashMap;

use crate::models::appointments::Appointment;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientIncome {
    pub client_name: String,
    pub count: u64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeStats {
    pub total_income: f64,
    pub total_count: u64,
    pub average_income: f64,
    /// Highest total first; ties broken by name.
    pub by_client: Vec<ClientIncome>,
}

/// Sums already-filtered appointments, grouped by client name.
pub fn summarize<'a, I>(appointments: I) -> IncomeStats
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut by_client: HashMap<&str, ClientIncome> = HashMap::new();
    let mut total_income = 0.0;
    let mut total_count = 0u64;

    for appo in appointments {
        total_income += appo.amount;
        total_count += 1;
        let entry = by_client
            .entry(appo.client_name.as_str())
            .or_insert_with(|| ClientIncome {
                client_name: appo.client_name.clone(),
                count: 0,
                total: 0.0,
            });
        entry.count += 1;
        entry.total += appo.amount;
    }

    let mut by_client: Vec<ClientIncome> = by_client.into_iter().map(|(_, v)| v).collect();
    by_client.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.client_name.cmp(&b.client_name))
    });

    let average_income = if total_count > 0 {
        total_income / total_count as f64
    } else {
        0.0
    };

    IncomeStats {
        total_income,
        total_count,
        average_income,
        by_client,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn appo(id: u64, client: &str, amount: f64) -> Appointment {
        let t = NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Appointment {
            id,
            client_name: client.to_string(),
            pickup_time: t,
            pickup_location: "Taipei Main Station".to_string(),
            arrival_time: t + chrono::Duration::hours(1),
            arrival_location: "Taoyuan Airport T2".to_string(),
            appointment_type_id: 1,
            flight_info: None,
            luggage_passengers: None,
            other_details: None,
            amount,
            status: "completed".to_string(),
            created_at: t,
            updated_at: t,
        }
    }

    #[test]
    fn empty_input() {
        let stats = summarize(&[] as &[Appointment]);
        assert_eq!(stats.total_income, 0.0);
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.average_income, 0.0);
        assert!(stats.by_client.is_empty());
    }

    #[test]
    fn groups_by_client_and_sorts_by_total() {
        let appos = vec![
            appo(1, "Chen", 1200.0),
            appo(2, "Lin", 3000.0),
            appo(3, "Chen", 900.0),
            appo(4, "Wang", 500.0),
        ];
        let stats = summarize(&appos);
        assert_eq!(stats.total_count, 4);
        assert_eq!(stats.total_income, 5600.0);
        assert_eq!(stats.average_income, 1400.0);

        let names: Vec<&str> = stats
            .by_client
            .iter()
            .map(|c| c.client_name.as_str())
            .collect();
        assert_eq!(names, vec!["Lin", "Chen", "Wang"]);
        assert_eq!(stats.by_client[1].count, 2);
        assert_eq!(stats.by_client[1].total, 2100.0);
    }

    #[test]
    fn equal_totals_sort_by_name() {
        let appos = vec![appo(1, "Wu", 800.0), appo(2, "Ho", 800.0)];
        let stats = summarize(&appos);
        assert_eq!(stats.by_client[0].client_name, "Ho");
        assert_eq!(stats.by_client[1].client_name, "Wu");
    }
}
