use leptos::prelude::*;

/// Spanish-style grouping: 1234567.5 -> "1.234.567,50"
pub fn format_money(val: f64) -> String {
    let negative = val < 0.0;
    let cents = (val.abs() * 100.0).round() as u64;
    let int_part = format_thousands(cents / 100);
    let sign = if negative { "-" } else { "" };
    format!("{}{},{:02}", sign, int_part, cents % 100)
}

pub fn format_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Formatted value, `None` while there is nothing to show
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let formatted = move || value.get().unwrap_or_else(|| "\u{2014}".to_string());

    view! {
        <div class="stat-card">
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_uses_dot_groups_and_comma_cents() {
        assert_eq!(format_money(0.0), "0,00");
        assert_eq!(format_money(1234567.5), "1.234.567,50");
        assert_eq!(format_money(-12.5), "-12,50");
    }

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1.000");
    }
}
