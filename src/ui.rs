use crate::models::{Dashboard, FoodEntry, WeightEntry};

pub fn render_index(dashboard: &Dashboard) -> String {
    let weight = dashboard
        .current_weight_kg
        .map(|kg| format!("{kg:.1} kg"))
        .unwrap_or_else(|| "No data".to_string());
    let target = dashboard
        .metrics
        .map(|m| format!("{} kcal", m.target_calories))
        .unwrap_or_else(|| "Set up your profile".to_string());
    let remaining = dashboard
        .remaining_calories
        .map(|kcal| format!("{kcal:.0} kcal"))
        .unwrap_or_else(|| "-".to_string());

    INDEX_HTML
        .replace("{{DATE}}", &dashboard.date.to_string())
        .replace("{{WEIGHT}}", &weight)
        .replace("{{CONSUMED}}", &format!("{:.0}", dashboard.food.total_calories))
        .replace("{{BURNED}}", &format!("{:.0}", dashboard.burned_calories))
        .replace("{{NET}}", &format!("{:.0}", dashboard.net_calories))
        .replace("{{TARGET}}", &target)
        .replace("{{REMAINING}}", &remaining)
        .replace("{{PROTEIN}}", &format!("{:.1}", dashboard.food.total_protein_g))
        .replace("{{CARBS}}", &format!("{:.1}", dashboard.food.total_carbs_g))
        .replace("{{FAT}}", &format!("{:.1}", dashboard.food.total_fat_g))
        .replace("{{RECENT_FOODS}}", &food_rows(&dashboard.recent_foods))
        .replace("{{RECENT_WEIGHTS}}", &weight_rows(&dashboard.recent_weights))
}

fn food_rows(foods: &[FoodEntry]) -> String {
    if foods.is_empty() {
        return "<li class=\"empty\">No meals recorded</li>".to_string();
    }
    foods
        .iter()
        .map(|food| {
            format!(
                "<li><span>{} &middot; {}</span><span>{:.0} kcal</span></li>",
                food.date,
                escape(&food.name),
                food.calories
            )
        })
        .collect()
}

fn weight_rows(weights: &[WeightEntry]) -> String {
    if weights.is_empty() {
        return "<li class=\"empty\">No weight data</li>".to_string();
    }
    weights
        .iter()
        .map(|entry| format!("<li><span>{}</span><span>{:.1} kg</span></li>", entry.date, entry.weight_kg))
        .collect()
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Nutrition Tracker</title>
  <style>
    :root {
      --bg: #f3f6f1;
      --ink: #1f2a24;
      --muted: #6b776f;
      --accent: #2e8b57;
      --warn: #d9822b;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(31, 42, 36, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #e2ecdf);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 14px;
    }

    .stat,
    .card {
      background: var(--card);
      border-radius: 16px;
      padding: 18px;
      box-shadow: var(--shadow);
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
      font-size: 1.5rem;
      font-weight: 600;
    }

    .stat .value.remaining {
      color: var(--accent);
    }

    .columns {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
      gap: 14px;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
    }

    li {
      display: flex;
      justify-content: space-between;
      padding: 8px 0;
      border-bottom: 1px solid rgba(31, 42, 36, 0.08);
    }

    li.empty {
      color: var(--muted);
    }

    .macros span {
      margin-right: 16px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Nutrition Tracker</h1>
      <p class="subtitle">Today is {{DATE}}</p>
    </header>

    <section class="panel">
      <div class="stat"><span class="label">Current weight</span><span class="value">{{WEIGHT}}</span></div>
      <div class="stat"><span class="label">Consumed</span><span class="value">{{CONSUMED}} kcal</span></div>
      <div class="stat"><span class="label">Burned</span><span class="value">{{BURNED}} kcal</span></div>
      <div class="stat"><span class="label">Net</span><span class="value">{{NET}} kcal</span></div>
      <div class="stat"><span class="label">Target</span><span class="value">{{TARGET}}</span></div>
      <div class="stat"><span class="label">Remaining</span><span class="value remaining">{{REMAINING}}</span></div>
    </section>

    <section class="card macros">
      <span>Protein {{PROTEIN}} g</span>
      <span>Carbs {{CARBS}} g</span>
      <span>Fat {{FAT}} g</span>
    </section>

    <section class="columns">
      <div class="card">
        <h2>Recent meals</h2>
        <ul>{{RECENT_FOODS}}</ul>
      </div>
      <div class="card">
        <h2>Recent weights</h2>
        <ul>{{RECENT_WEIGHTS}}</ul>
      </div>
    </section>
  </main>
</body>
</html>
"#;
