//! Sample popups for a fresh database.

use chrono::{DateTime, TimeZone, Utc};
use popup_builder_core::types::NewPopup;

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn embed_script(n: u32) -> String {
    format!(r#"<script src="https://popups.example.com/embed/popup-{n}.js"></script>"#)
}

/// The three sample popups with their creation dates, oldest first.
#[must_use]
pub fn sample_popups() -> Vec<(NewPopup, DateTime<Utc>)> {
    vec![
        (
            NewPopup {
                template: Some("discount".to_string()),
                subheadline: Some(
                    "Join our newsletter and receive an exclusive discount code".to_string(),
                ),
                background_color: "#6366f1".to_string(),
                text_color: "#ffffff".to_string(),
                button_color: "#ffffff".to_string(),
                border_radius: 16,
                close_on_outside_click: false,
                animation_style: "zoom".to_string(),
                embed_code: Some(embed_script(1)),
                is_published: true,
                ..NewPopup::with_defaults(
                    "Welcome Discount - 10% Off",
                    "Welcome! Get 10% Off Your First Order",
                    "Get My Discount",
                )
            },
            day(2024, 1, 5),
        ),
        (
            NewPopup {
                template: Some("cart-reminder".to_string()),
                subheadline: Some(
                    "Complete your purchase and get free shipping on orders over $50".to_string(),
                ),
                text_color: "#1f2937".to_string(),
                button_color: "#10b981".to_string(),
                animation_style: "slide".to_string(),
                embed_code: Some(embed_script(2)),
                is_published: true,
                ..NewPopup::with_defaults(
                    "Cart Reminder",
                    "Don't Leave Empty Handed!",
                    "Complete My Order",
                )
            },
            day(2024, 1, 15),
        ),
        (
            NewPopup {
                template: Some("newsletter".to_string()),
                subheadline: Some(
                    "Subscribe to get exclusive offers and new product alerts".to_string(),
                ),
                background_color: "#f3f4f6".to_string(),
                text_color: "#111827".to_string(),
                button_color: "#ef4444".to_string(),
                border_radius: 8,
                show_image: false,
                ..NewPopup::with_defaults(
                    "Newsletter Subscription",
                    "Stay Updated with Our Latest Deals",
                    "Subscribe Now",
                )
            },
            day(2024, 1, 25),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_dated_oldest_first() {
        let samples = sample_popups();
        assert_eq!(samples.len(), 3);
        assert!(samples.windows(2).all(|w| w[0].1 < w[1].1));
        assert_eq!(samples[0].1.to_rfc3339(), "2024-01-05T00:00:00+00:00");
    }

    #[test]
    fn only_newsletter_sample_is_unpublished() {
        let unpublished: Vec<_> = sample_popups()
            .into_iter()
            .filter(|(p, _)| !p.is_published)
            .map(|(p, _)| p.name)
            .collect();
        assert_eq!(unpublished, ["Newsletter Subscription"]);
    }
}
