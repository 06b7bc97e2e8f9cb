// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Notification rendering for accepted submissions.
//!
//! Pure functions from a validated payload to the owner notification.
//! Every user-controlled string is escaped at the point it is embedded in
//! markup; the subject line is a plain-text header and stays raw.

use crate::config::EmailConfig;
use crate::payload::{QuoteSnapshot, SubmissionPayload};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Rendered notification ready for delivery.
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

/// Replace the five HTML-significant characters with entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Format a dollar amount the way the site displays prices: rounded to the
/// nearest dollar, comma-grouped, no cents.
pub fn format_nzd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Render the owner notification for an accepted submission.
pub fn render_notification(
    payload: &SubmissionPayload,
    received_at: DateTime<Utc>,
    config: &EmailConfig,
) -> EmailContent {
    let company = payload.company.as_deref().filter(|c| !c.is_empty());

    let subject = match company {
        Some(company) => format!("New Inquiry: {} — {}", payload.name, company),
        None => format!("New Inquiry: {}", payload.name),
    };

    let title = if payload.quote.is_some() {
        "New Quote Request"
    } else {
        "New Project Inquiry"
    };

    let mut html = String::with_capacity(2_048);
    html.push_str("<!DOCTYPE html><html><body style=\"font-family: sans-serif; color: #1a1a2e;\">");
    let _ = write!(
        html,
        "<img src=\"{}/images/logo-with-text.png\" alt=\"{}\" height=\"40\">",
        config.site_url,
        escape_html(&config.sender_name)
    );
    let _ = write!(html, "<h1>{title}</h1>");
    let _ = write!(
        html,
        "<p>Received {}</p>",
        received_at.format("%-d %B %Y, %H:%M UTC")
    );

    html.push_str("<h2>Contact Details</h2><table>");
    let _ = write!(
        html,
        "<tr><td>Name</td><td>{}</td></tr>",
        escape_html(&payload.name)
    );
    let _ = write!(
        html,
        "<tr><td>Email</td><td><a href=\"mailto:{0}\">{0}</a></td></tr>",
        escape_html(&payload.email)
    );
    if let Some(company) = company {
        let _ = write!(
            html,
            "<tr><td>Company</td><td>{}</td></tr>",
            escape_html(company)
        );
    }
    html.push_str("</table>");

    if let Some(quote) = &payload.quote {
        push_quote_block(&mut html, quote);
    }

    html.push_str("<h2>Message</h2>");
    let _ = write!(
        html,
        "<p style=\"white-space: pre-wrap;\">{}</p>",
        escape_html(&payload.message)
    );

    let first_name = payload.name.split(' ').next().unwrap_or(&payload.name);
    html.push_str("<hr>");
    let _ = write!(
        html,
        "<p><a href=\"mailto:{}\">Reply to {}</a></p>",
        escape_html(&payload.email),
        escape_html(first_name)
    );
    let _ = write!(
        html,
        "<p><a href=\"{0}\">{0}</a></p>",
        config.site_url
    );
    html.push_str("</body></html>");

    EmailContent { subject, html }
}

fn push_quote_block(html: &mut String, quote: &QuoteSnapshot) {
    html.push_str("<h2>Quote Summary</h2>");
    let _ = write!(
        html,
        "<p><strong>{}</strong> ({}): {} + {}/mo</p>",
        escape_html(&quote.package_label),
        escape_html(&quote.package),
        format_nzd(quote.package_upfront),
        format_nzd(quote.package_monthly)
    );
    if !quote.add_ons.is_empty() {
        html.push_str("<h3>Add-on Services</h3><ul>");
        for add_on in &quote.add_ons {
            let _ = write!(
                html,
                "<li>{}: {} / {}/mo</li>",
                escape_html(&add_on.name),
                format_nzd(add_on.setup),
                format_nzd(add_on.monthly)
            );
        }
        html.push_str("</ul>");
    }
    let _ = write!(
        html,
        "<p>Total One-Time: <strong>{}</strong><br>Monthly: <strong>{}</strong></p>",
        format_nzd(quote.total_upfront),
        format_nzd(quote.total_monthly)
    );
}
