use crate::models::Dashboard;
use crate::window::ChartSeries;
use std::fmt::Write;

pub fn render_index(dashboard: &Dashboard) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &dashboard.date)
        .replace("{{INVITES_TODAY}}", &dashboard.invites_today.to_string())
        .replace("{{CANCELLATIONS}}", &dashboard.cancellations.to_string())
        .replace(
            "{{AVG_INVITES}}",
            &format_average(dashboard.avg_invites_per_day),
        )
        .replace(
            "{{AVG_RESERVATIONS}}",
            &format_average(dashboard.avg_reservations_per_day),
        )
        .replace(
            "{{SEATS}}",
            &format!(
                "{} / {}",
                dashboard.seats_available_today, dashboard.total_seats
            ),
        )
        .replace("{{INVITE_CHART}}", &render_bars(&dashboard.invites))
        .replace("{{SEAT_CHART}}", &render_bars(&dashboard.reservations))
}

fn format_average(value: Option<f64>) -> String {
    match value {
        Some(avg) => format!("{avg:.1}"),
        None => "N/A".to_string(),
    }
}

fn render_bars(series: &ChartSeries) -> String {
    const WIDTH: f64 = 560.0;
    const HEIGHT: f64 = 180.0;
    const LABEL_SPACE: f64 = 24.0;

    if series.data.is_empty() {
        return r#"<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data</text>"#
            .to_string();
    }

    let max = series.data.iter().copied().max().unwrap_or(0).max(1) as f64;
    let slot = WIDTH / series.data.len() as f64;
    let bar_width = slot * 0.6;
    let plot_height = HEIGHT - LABEL_SPACE;

    let mut svg = String::new();
    for (index, (label, value)) in series.labels.iter().zip(&series.data).enumerate() {
        let bar_height = plot_height * (*value as f64) / max;
        let x = slot * index as f64 + (slot - bar_width) / 2.0;
        let y = plot_height - bar_height;
        let day = label.get(5..).unwrap_or(label.as_str());
        let _ = write!(
            svg,
            r#"<rect class="bar" x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{bar_height:.1}"><title>{label}: {value}</title></rect>"#
        );
        let _ = write!(
            svg,
            r#"<text class="chart-label" x="{:.1}" y="{:.1}" text-anchor="middle">{day}</text>"#,
            x + bar_width / 2.0,
            HEIGHT - 6.0
        );
    }
    svg
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Visitor Dashboard</title>
  <style>
    :root {
      --bg: #eef2f5;
      --ink: #1f2a33;
      --muted: #6a7680;
      --accent: #2a7f8f;
      --card: #ffffff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px;
    }

    main {
      width: min(900px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: 2.2rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 14px;
    }

    .stat,
    .chart-card {
      background: var(--card);
      border-radius: 14px;
      padding: 16px;
      box-shadow: 0 8px 24px rgba(31, 42, 51, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      display: block;
      margin-top: 6px;
      font-size: 1.6rem;
      font-weight: 600;
    }

    .chart-card h2 {
      margin: 0 0 12px;
      font-size: 1.1rem;
    }

    svg {
      width: 100%;
      height: 180px;
    }

    .bar {
      fill: var(--accent);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Visitor Dashboard</h1>
      <p class="subtitle">Week starting {{DATE}}</p>
    </header>
    <section class="panel">
      <div class="stat">
        <span class="label">Invites today</span>
        <span class="value">{{INVITES_TODAY}}</span>
      </div>
      <div class="stat">
        <span class="label">Cancellations this week</span>
        <span class="value">{{CANCELLATIONS}}</span>
      </div>
      <div class="stat">
        <span class="label">Avg invites / day</span>
        <span class="value">{{AVG_INVITES}}</span>
      </div>
      <div class="stat">
        <span class="label">Avg seat bookings / day</span>
        <span class="value">{{AVG_RESERVATIONS}}</span>
      </div>
      <div class="stat">
        <span class="label">Seats free today</span>
        <span class="value">{{SEATS}}</span>
      </div>
    </section>
    <section class="chart-card">
      <h2>Invites</h2>
      <svg viewBox="0 0 560 180" role="img" aria-label="Invites per day">{{INVITE_CHART}}</svg>
    </section>
    <section class="chart-card">
      <h2>Seat reservations</h2>
      <svg viewBox="0 0 560 180" role="img" aria-label="Seat reservations per day">{{SEAT_CHART}}</svg>
    </section>
  </main>
</body>
</html>
"#;
