use crate::districts::District;

pub fn render_index(selected: District, days: usize, max_days: usize) -> String {
    INDEX_HTML
        .replace("{{DISTRICT_OPTIONS}}", &district_options(selected))
        .replace("{{DISTRICT}}", selected.name())
        .replace("{{MAX_DAYS}}", &max_days.to_string())
        .replace("{{DAYS}}", &days.to_string())
}

fn district_options(selected: District) -> String {
    District::ALL
        .iter()
        .map(|district| {
            let marker = if *district == selected { " selected" } else { "" };
            format!(
                r#"<option value="{name}"{marker}>{name}</option>"#,
                name = district.name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Berlin Covid-19 Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef2f3;
      --bg-2: #c9d6df;
      --ink: #2b2a28;
      --accent: #d1495b;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e2ebf0 60%, #f4f7f8 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
      font-size: 0.95rem;
    }

    .controls {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
      align-items: end;
    }

    .controls label {
      display: grid;
      gap: 8px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    select,
    input[type="range"] {
      font: inherit;
      width: 100%;
    }

    select {
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
      text-transform: none;
      letter-spacing: normal;
      color: var(--ink);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
    }

    svg.chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    table {
      border-collapse: collapse;
      width: 100%;
      font-size: 0.95rem;
    }

    th,
    td {
      text-align: left;
      padding: 6px 10px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    th {
      color: #8b857d;
      font-weight: 500;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Berlin Covid-19 Dashboard</h1>
      <p class="subtitle">Daily new cases, the rolling 7-day average and the 7-day incidence for each district of Berlin, or the whole city.</p>
    </header>

    <section class="controls">
      <label>District
        <select id="district">
          {{DISTRICT_OPTIONS}}
        </select>
      </label>
      <label>Days to display: <span id="days-value">{{DAYS}}</span>
        <input id="days" type="range" min="0" max="{{MAX_DAYS}}" value="{{DAYS}}" />
      </label>
    </section>

    <div class="status" id="status"></div>

    <section class="chart-card">
      <h2 id="incidence-title">Seven Day Incidence for {{DISTRICT}}</h2>
      <p class="subtitle">Cases per 100,000 inhabitants over the previous seven days.</p>
      <svg id="incidence-chart" class="chart" viewBox="0 0 600 260" role="img"></svg>
      <table id="incidence-table"></table>
    </section>

    <section class="chart-card">
      <h2 id="average-title">7 Day Average for {{DISTRICT}}</h2>
      <p class="subtitle">The value for a day is the total of new cases over that day and the six before it, divided by 7.</p>
      <svg id="average-chart" class="chart" viewBox="0 0 600 260" role="img"></svg>
      <table id="average-table"></table>
    </section>

    <section class="chart-card">
      <h2 id="cases-title">New Cases in {{DISTRICT}}</h2>
      <p class="subtitle">Raw newly reported cases per day; noisier than the 7-day average.</p>
      <svg id="cases-chart" class="chart" viewBox="0 0 600 260" role="img"></svg>
      <table id="cases-table"></table>
    </section>

    <p class="hint">Data: daily figures per district published by the Berlin state office for health and social affairs (LAGeSo). Figures are fetched fresh on every update.</p>
  </main>

  <script>
    const districtEl = document.getElementById('district');
    const daysEl = document.getElementById('days');
    const daysValueEl = document.getElementById('days-value');
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const formatValue = (value, decimals) => {
      if (typeof value !== 'number' || Number.isNaN(value)) {
        return '--';
      }
      return decimals ? value.toFixed(decimals) : value.toString();
    };

    const formatAxisValue = (value) => {
      const rounded = Math.round(value * 10) / 10;
      return Number.isInteger(rounded) ? rounded.toString() : rounded.toFixed(1);
    };

    const renderLineChart = (chartEl, points) => {
      const defined = points
        .map((point, index) => ({ ...point, index }))
        .filter((point) => typeof point.value === 'number');
      if (!defined.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data</text>';
        return;
      }

      const width = 600;
      const height = 260;
      const paddingX = 44;
      const paddingY = 34;
      const top = 24;

      const values = defined.map((point) => point.value);
      let min = Math.min(0, ...values);
      let max = Math.max(0, ...values);
      if (min === max) {
        max += 1;
      }

      const range = max - min;
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const scaleY = (height - top - paddingY) / range;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - (value - min) * scaleY;

      const path = defined
        .map((point, i) => `${i === 0 ? 'M' : 'L'} ${x(point.index).toFixed(2)} ${y(point.value).toFixed(2)}`)
        .join(' ');

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(points.length / 8));
      const xLabels = points
        .map((point, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${point.date.slice(5)}</text>`;
        })
        .join('');

      const circles = defined
        .map((point) => `<circle class="chart-point" cx="${x(point.index)}" cy="${y(point.value)}" r="3" />`)
        .join('');

      chartEl.innerHTML = `${grid}<path class="chart-line" d="${path}" />${circles}${xLabels}`;
    };

    const renderTable = (tableEl, label, rows, decimals) => {
      const body = rows
        .map((row) => `<tr><td>${row.date}</td><td>${formatValue(row.value, decimals)}</td></tr>`)
        .join('');
      tableEl.innerHTML = `<tr><th>Date</th><th>${label}</th></tr>${body}`;
    };

    const render = (data) => {
      const suffix = ` - Last ${data.days} Days`;
      document.getElementById('incidence-title').textContent = `Seven Day Incidence for ${data.district}${suffix}`;
      document.getElementById('average-title').textContent = `7 Day Average for ${data.district}${suffix}`;
      document.getElementById('cases-title').textContent = `New Cases in ${data.district}${suffix}`;

      renderLineChart(document.getElementById('incidence-chart'), data.incidence);
      renderLineChart(document.getElementById('average-chart'), data.rolling_average);
      renderLineChart(document.getElementById('cases-chart'), data.new_cases);

      renderTable(document.getElementById('incidence-table'), 'Seven Day Incidence', data.latest.incidence, 2);
      renderTable(document.getElementById('average-table'), '7 Day Average', data.latest.rolling_average, 2);
      renderTable(document.getElementById('cases-table'), 'New Cases', data.latest.new_cases, 0);
    };

    const refresh = async () => {
      const district = encodeURIComponent(districtEl.value);
      const days = daysEl.value;
      setStatus('Loading...', 'info');
      const res = await fetch(`/api/series?district=${district}&days=${days}`);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to load current data');
      }
      render(await res.json());
      setStatus('', '');
    };

    districtEl.addEventListener('change', () => {
      refresh().catch((err) => setStatus(err.message, 'error'));
    });

    daysEl.addEventListener('input', () => {
      daysValueEl.textContent = daysEl.value;
    });

    daysEl.addEventListener('change', () => {
      refresh().catch((err) => setStatus(err.message, 'error'));
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
