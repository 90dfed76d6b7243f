//! Step template catalog

use crate::types::{Step, StepBody, StepContent, StepKind, StepStyle};

/// Preset content and style a new step can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTemplate {
    pub name: &'static str,
    pub kind: StepKind,
    pub headline: &'static str,
    pub subheadline: &'static str,
    pub button_text: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub button_color: &'static str,
    pub border_radius: i32,
    pub show_image: bool,
}

impl StepTemplate {
    /// Lowercased name with whitespace runs replaced by `-`.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Build a step from this template.
    #[must_use]
    pub fn to_step(&self, id: String) -> Step {
        Step {
            id,
            name: self.name.to_string(),
            kind: self.kind,
            template: Some(self.slug()),
            body: StepBody {
                content: StepContent {
                    headline: self.headline.to_string(),
                    subheadline: self.subheadline.to_string(),
                    button_text: self.button_text.to_string(),
                    button_url: None,
                },
                style: StepStyle {
                    background_color: self.background_color.to_string(),
                    text_color: self.text_color.to_string(),
                    button_color: self.button_color.to_string(),
                    border_radius: self.border_radius,
                    background_image: None,
                    show_image: self.show_image,
                },
                form_fields: Vec::new(),
            },
            follow_ups: Vec::new(),
        }
    }
}

pub const TEMPLATES: [StepTemplate; 7] = [
    StepTemplate {
        name: "Blank Canvas",
        kind: StepKind::Custom,
        headline: "Your Headline Here",
        subheadline: "Add your message here",
        button_text: "Click Here",
        background_color: "#ffffff",
        text_color: "#000000",
        button_color: "#000000",
        border_radius: 8,
        show_image: false,
    },
    StepTemplate {
        name: "Newsletter Signup",
        kind: StepKind::EmailCapture,
        headline: "Join Our Newsletter",
        subheadline: "Get weekly updates and exclusive offers",
        button_text: "Subscribe Now",
        background_color: "#ffffff",
        text_color: "#1f2937",
        button_color: "#3b82f6",
        border_radius: 8,
        show_image: false,
    },
    StepTemplate {
        name: "Exit Intent",
        kind: StepKind::Offer,
        headline: "Wait! Don't Leave Yet",
        subheadline: "Get 15% off before you go",
        button_text: "Claim Discount",
        background_color: "#a855f7",
        text_color: "#ffffff",
        button_color: "#ffffff",
        border_radius: 16,
        show_image: true,
    },
    StepTemplate {
        name: "Limited Offer",
        kind: StepKind::Offer,
        headline: "⚡ Flash Sale - 50% Off!",
        subheadline: "Limited time offer. Hurry before it ends!",
        button_text: "Shop Now",
        background_color: "#ef4444",
        text_color: "#ffffff",
        button_color: "#fbbf24",
        border_radius: 12,
        show_image: true,
    },
    StepTemplate {
        name: "Video Popup",
        kind: StepKind::Custom,
        headline: "Watch Our Demo",
        subheadline: "See how it works in 2 minutes",
        button_text: "Play Video",
        background_color: "#10b981",
        text_color: "#ffffff",
        button_color: "#ffffff",
        border_radius: 20,
        show_image: true,
    },
    StepTemplate {
        name: "Thank You",
        kind: StepKind::Confirmation,
        headline: "Thank You!",
        subheadline: "Check your email for your discount code",
        button_text: "Continue Shopping",
        background_color: "#f3f4f6",
        text_color: "#111827",
        button_color: "#10b981",
        border_radius: 8,
        show_image: true,
    },
    StepTemplate {
        name: "Free Shipping",
        kind: StepKind::Offer,
        headline: "You've Got Free Shipping",
        subheadline: "Get free shipping on your order today",
        button_text: "Claim Offer",
        background_color: "#FFFFFF",
        text_color: "#493D34",
        button_color: "#EC5B31",
        border_radius: 12,
        show_image: true,
    },
];

/// Look up a template by display name or slug.
#[must_use]
pub fn find_template(key: &str) -> Option<&'static StepTemplate> {
    TEMPLATES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(key) || t.slug() == key)
}

/// The template used when none is chosen.
#[must_use]
pub fn blank_canvas() -> &'static StepTemplate {
    &TEMPLATES[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_collapse_whitespace() {
        assert_eq!(TEMPLATES[1].slug(), "newsletter-signup");
        assert_eq!(TEMPLATES[3].slug(), "limited-offer");
    }

    #[test]
    fn lookup_by_name_or_slug() {
        assert_eq!(find_template("Thank You").unwrap().kind, StepKind::Confirmation);
        assert_eq!(find_template("exit-intent").unwrap().border_radius, 16);
        assert!(find_template("nope").is_none());
    }

    #[test]
    fn step_from_template_copies_content_and_style() {
        let step = TEMPLATES[2].to_step("42".to_string());
        assert_eq!(step.id, "42");
        assert_eq!(step.name, "Exit Intent");
        assert_eq!(step.template.as_deref(), Some("exit-intent"));
        assert_eq!(step.body.content.button_text, "Claim Discount");
        assert_eq!(step.body.style.background_color, "#a855f7");
        assert!(step.follow_ups.is_empty());
    }
}
