use chrono::NaiveDate;
use subtrack_format::{format_currency, format_date, format_payment_date, format_percentage};
use subtrack_models::{Category, CategoryId, Subscription, UserPlan};

pub fn subscription_lines(
    subscriptions: &[Subscription],
    category_name: impl Fn(CategoryId) -> String,
) -> Vec<String> {
    let mut lines = Vec::new();
    for subscription in subscriptions {
        lines.push(format!(
            "#{} {} [{}]",
            subscription.id,
            subscription.name,
            category_name(subscription.category_id)
        ));
        for plan in &subscription.plans {
            lines.push(format!(
                "    plan #{} {} {}/{}",
                plan.id,
                plan.name,
                format_currency(plan.cost),
                plan.period
            ));
        }
    }
    lines
}

pub fn category_lines(categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .map(|category| format!("#{} {}", category.id, category.name))
        .collect()
}

pub fn user_plan_line(user_plan: &UserPlan, today: NaiveDate) -> String {
    let name = match (&user_plan.subscription_name, &user_plan.plan_name) {
        (Some(subscription), Some(plan)) => format!("{subscription} {plan}"),
        (None, Some(plan)) => plan.clone(),
        (Some(subscription), None) => subscription.clone(),
        (None, None) => format!("plan #{}", user_plan.plan_id),
    };
    let price = match (user_plan.cost, user_plan.period) {
        (Some(cost), Some(period)) => format!(" {}/{}", format_currency(cost), period),
        (Some(cost), None) => format!(" {}", format_currency(cost)),
        _ => String::new(),
    };
    let due = match user_plan.payment_date {
        Some(date) => format!(
            "next payment {} ({})",
            format_date(date),
            format_payment_date(date, today)
        ),
        None => "no payment date".to_string(),
    };
    let usage = if user_plan.track_usage {
        format!(
            "tracking, usage {}",
            format_percentage(f64::from(user_plan.average_usage))
        )
    } else {
        "not tracking".to_string()
    };

    format!("#{} {}{} - {}, {}", user_plan.id, name, price, due, usage)
}
