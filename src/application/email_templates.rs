use url::Url;

use crate::domain::entities::plan::Plan;

fn origin_label(app_origin: &str) -> String {
    Url::parse(app_origin)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.to_string()))
        .unwrap_or_else(|| app_origin.to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format an integer with thousands separators: 5000 -> "5,000".
fn format_points(points: i64) -> String {
    let digits = points.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if points < 0 {
        out.insert(0, '-');
    }
    out
}

pub fn primary_button(url: &str, label: &str) -> String {
    format!(
        r#"<a href="{url}" style="display:inline-block;padding:12px 18px;background-color:#111827;color:#ffffff;text-decoration:none;border-radius:8px;font-weight:600;">{label}</a>"#
    )
}

pub fn plan_activated_email(app_origin: &str, app_name: &str, plan: &Plan) -> (String, String) {
    let plan_label = capitalize(plan.name);
    let subject = format!("Your {} {} plan is active", app_name, plan_label);
    let headline = format!("Welcome to {}", plan_label);
    let lead = format!(
        "Your <strong>{}</strong> subscription is active and <strong>{}</strong> points have been added to your account.",
        plan_label,
        format_points(plan.points)
    );
    let button = primary_button(app_origin, "Start using your points");

    let html = wrap_email(app_origin, app_name, &headline, &lead, &button);
    (subject, html)
}

fn wrap_email(app_origin: &str, app_name: &str, headline: &str, lead: &str, body: &str) -> String {
    let origin = origin_label(app_origin);
    format!(
        r#"<!doctype html>
<html>
  <body style="margin:0;padding:24px;background-color:#f3f4f6;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;">
    <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width:560px;margin:0 auto;background-color:#ffffff;border-radius:12px;padding:32px;">
      <tr><td>
        <p style="margin:0 0 8px;color:#6b7280;font-size:13px;">{app_name}</p>
        <h1 style="margin:0 0 16px;font-size:22px;color:#111827;">{headline}</h1>
        <p style="margin:0 0 20px;color:#374151;">{lead}</p>
        {body}
        <p style="margin:28px 0 0;color:#9ca3af;font-size:12px;">You received this email because you purchased a plan on {origin}.</p>
      </td></tr>
    </table>
  </body>
</html>"#
    )
}
