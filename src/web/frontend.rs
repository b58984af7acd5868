//! Embedded HTML/CSS/JS frontend for the mydash web dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies. Charts are drawn
//! on a `<canvas>` straight from the `ChartSpec` JSON.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>MyDash</title>
<style>
:root {
  --bg: #f3f4f6;
  --surface: #ffffff;
  --sidebar: #1e293b;
  --sidebar-hover: #334155;
  --sidebar-active: #0f172a;
  --accent: #2563eb;
  --text: #374151;
  --text-muted: #6b7280;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  display: flex;
  height: 100vh;
}

/* Sidebar */
#sidebar {
  position: fixed; top: 0; left: 0; bottom: 0;
  width: 256px;
  background: var(--sidebar);
  color: #fff;
  transition: width .3s ease;
  overflow: hidden;
}
#sidebar.collapsed { width: 80px; }
#sidebar .brand {
  height: 64px; display: flex; align-items: center; justify-content: center;
  font-size: 22px; font-weight: 700; border-bottom: 1px solid var(--sidebar-hover);
}
#sidebar.collapsed .brand span, #sidebar.collapsed .label, #sidebar.collapsed .items { display: none; }
.group { padding: 0 8px; }
.group > button {
  width: 100%; display: flex; align-items: center; gap: 12px;
  padding: 12px; margin: 4px 0; border: 0; border-radius: var(--radius);
  background: transparent; color: #fff; font-weight: 600; cursor: pointer; text-align: left;
}
.group > button:hover { background: var(--sidebar-hover); }
.group > button.active { background: var(--accent); }
.items { max-height: 0; overflow: hidden; transition: max-height .3s ease; }
.items.open { max-height: 384px; }
.items a {
  display: block; padding: 8px 8px 8px 40px; margin: 2px 0; border-radius: 6px;
  color: #cbd5e1; text-decoration: none; font-size: 13px;
}
.items a:hover { background: var(--sidebar-hover); }
.items a.active { background: var(--sidebar-active); color: #93c5fd; }
.icon { width: 22px; text-align: center; flex-shrink: 0; }

/* Content */
#content { flex: 1; display: flex; flex-direction: column; margin-left: 256px; transition: margin .3s ease; }
#content.wide { margin-left: 80px; }
header {
  padding: 16px; background: var(--surface); border-bottom: 1px solid #e5e7eb;
  display: flex; align-items: center; gap: 16px;
}
header button { border: 0; background: transparent; font-size: 22px; cursor: pointer; color: var(--text-muted); }
header h1 { font-size: 20px; font-weight: 600; }
main { flex: 1; padding: 32px; overflow-y: auto; }
.card { background: var(--surface); border-radius: var(--radius); box-shadow: 0 1px 3px rgba(0,0,0,.1); padding: 24px; }
.card h2 { font-size: 22px; margin-bottom: 16px; font-weight: 600; }
.chart-row { display: flex; gap: 48px; align-items: center; flex-wrap: wrap; }
canvas { max-width: 100%; }
.legend h3 { font-size: 17px; text-decoration: underline; margin-bottom: 16px; }
.legend .row { display: flex; align-items: flex-start; margin-bottom: 16px; }
.legend .dot { width: 20px; height: 20px; border-radius: 50%; margin: 4px 12px 0 0; }
.legend .value { font-size: 24px; font-weight: 700; color: #1f2937; }
.muted { color: var(--text-muted); text-align: center; padding: 32px; }
.retry { margin-top: 12px; padding: 6px 14px; border: 1px solid #d1d5db; border-radius: 6px; background: #fff; cursor: pointer; }
</style>
</head>
<body>
<div id="sidebar">
  <div class="brand"><span>MyDash</span></div>
  <nav id="nav"></nav>
</div>
<div id="content">
  <header>
    <button id="toggle" title="Toggle sidebar">&#9776;</button>
    <h1>Analytics Dashboard</h1>
  </header>
  <main id="main"><p class="muted">Loading…</p></main>
</div>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
let snapshot = null;
let pollTimer = null;

const ICONS = {
  'dollar-sign': '$', 'chart-line': '📈', 'upload': '⇪', 'bar-chart': '▥',
  'trending-up': '↗', 'box': '▣', 'activity': '∿', 'users': '👥',
  'pie-chart': '◔', 'map-pin': '⌖'
};

// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
async function api(method, path) {
  const res = await fetch(path, { method });
  const body = await res.json();
  if (!res.ok) throw new Error(body.error || res.statusText);
  return body;
}

async function refresh() {
  try {
    apply(await api('GET', '/api/state'));
  } catch (e) {
    console.error('state refresh failed', e);
  }
}

async function post(path) {
  try {
    apply(await api('POST', path));
  } catch (e) {
    console.error(path, e);
  }
}

function apply(next) {
  snapshot = next;
  renderSidebar();
  renderMain();
  clearTimeout(pollTimer);
  if (snapshot.content.status === 'loading' || snapshot.content.status === 'idle') {
    pollTimer = setTimeout(refresh, 400);
  }
}

// ---------------------------------------------------------------------------
// Sidebar
// ---------------------------------------------------------------------------
function renderSidebar() {
  const nav = snapshot.navigation;
  document.getElementById('sidebar').classList.toggle('collapsed', !nav.sidebar_expanded);
  document.getElementById('content').classList.toggle('wide', !nav.sidebar_expanded);

  const el = document.getElementById('nav');
  el.innerHTML = '';
  for (const group of snapshot.menu) {
    const wrap = document.createElement('div');
    wrap.className = 'group';

    const btn = document.createElement('button');
    btn.className = group.id === nav.active_group ? 'active' : '';
    btn.innerHTML = `<span class="icon">${ICONS[group.icon] || '•'}</span><span class="label">${group.title}</span>`;
    btn.onclick = () => post('/api/nav/group/' + group.id);
    wrap.appendChild(btn);

    const items = document.createElement('div');
    items.className = 'items' + (group.id === nav.active_group ? ' open' : '');
    for (const item of group.items) {
      const a = document.createElement('a');
      a.href = '#';
      a.className = item.id === nav.active_item ? 'active' : '';
      a.textContent = (ICONS[item.icon] || '•') + '  ' + item.title;
      a.onclick = e => { e.preventDefault(); post('/api/nav/item/' + item.id); };
      items.appendChild(a);
    }
    wrap.appendChild(items);
    el.appendChild(wrap);
  }
}

// ---------------------------------------------------------------------------
// Main area
// ---------------------------------------------------------------------------
function renderMain() {
  const main = document.getElementById('main');
  const c = snapshot.content;

  if (c.status === 'idle' || c.status === 'loading') {
    main.innerHTML = '<p class="muted">Loading chart…</p>';
    return;
  }
  if (c.status === 'static') {
    main.innerHTML = '<div class="card"><h2>Upload Excel/CSV</h2><p class="muted">File upload is handled by the analytics backend.</p></div>';
    return;
  }
  if (c.status === 'failed') {
    main.innerHTML = '<div class="card"><p class="muted">This chart is unavailable right now.</p>' +
      '<p class="muted" style="padding:0">' + escapeHtml(c.reason) + '</p>' +
      '<div style="text-align:center"><button class="retry" id="retry">Retry</button></div></div>';
    document.getElementById('retry').onclick = () => post('/api/view/reload');
    return;
  }

  main.innerHTML = `<div class="card"><h2>${escapeHtml(c.title)}</h2><div class="chart-row"><canvas id="chart" width="720" height="360"></canvas><div id="legend" class="legend"></div></div></div>`;
  const canvas = document.getElementById('chart');
  if (c.chart.labels.length === 0) {
    main.querySelector('.chart-row').innerHTML = '<p class="muted">No data.</p>';
    return;
  }
  if (c.chart.kind === 'doughnut') { canvas.width = 360; drawDoughnut(canvas, c.chart); }
  else if (c.chart.kind === 'line') drawLine(canvas, c.chart);
  else drawBars(canvas, c.chart);

  if (c.legend) renderLegend(c.legend);
}

function renderLegend(entries) {
  const el = document.getElementById('legend');
  el.innerHTML = '<h3>Detailed Counts</h3>' + entries.map(e =>
    `<div class="row"><span class="dot" style="background:${e.color.css}"></span>` +
    `<div><p>${escapeHtml(e.label)}</p><p class="value">${e.formatted_value}</p></div></div>`
  ).join('');
}

function escapeHtml(s) {
  return String(s).replace(/[&<>"]/g, ch => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;' }[ch]));
}

// ---------------------------------------------------------------------------
// Canvas renderers
// ---------------------------------------------------------------------------
function drawDoughnut(canvas, chart) {
  const ctx = canvas.getContext('2d');
  const total = chart.series.reduce((a, b) => a + Math.max(b, 0), 0) || 1;
  const cx = canvas.width / 2, cy = canvas.height / 2;
  const outer = Math.min(cx, cy) - 8, inner = outer * 0.7;
  let angle = -Math.PI / 2;
  chart.series.forEach((v, i) => {
    const sweep = (Math.max(v, 0) / total) * Math.PI * 2;
    ctx.beginPath();
    ctx.arc(cx, cy, outer, angle, angle + sweep);
    ctx.arc(cx, cy, inner, angle + sweep, angle, true);
    ctx.closePath();
    ctx.fillStyle = chart.colors[i].css;
    ctx.fill();
    ctx.strokeStyle = '#ffffff';
    ctx.lineWidth = 3;
    ctx.stroke();
    angle += sweep;
  });
}

function axes(canvas, chart) {
  const pad = { l: 60, r: 16, t: 16, b: 48 };
  const w = canvas.width - pad.l - pad.r, h = canvas.height - pad.t - pad.b;
  const max = Math.max(...chart.series, 0) || 1;
  const min = Math.min(...chart.series, 0);
  const y = v => pad.t + h - ((v - min) / (max - min)) * h;
  const ctx = canvas.getContext('2d');
  ctx.strokeStyle = '#d1d5db';
  ctx.fillStyle = '#6b7280';
  ctx.font = '11px sans-serif';
  for (let k = 0; k <= 4; k++) {
    const v = min + (max - min) * k / 4;
    ctx.beginPath(); ctx.moveTo(pad.l, y(v)); ctx.lineTo(pad.l + w, y(v)); ctx.stroke();
    ctx.fillText(v.toLocaleString(undefined, { maximumFractionDigits: 2 }), 4, y(v) + 4);
  }
  return { ctx, pad, w, h, y };
}

function drawBars(canvas, chart) {
  const { ctx, pad, w, y } = axes(canvas, chart);
  const slot = w / chart.labels.length;
  chart.series.forEach((v, i) => {
    const x = pad.l + i * slot + slot * 0.15;
    ctx.fillStyle = chart.colors[i].css;
    ctx.fillRect(x, Math.min(y(v), y(0)), slot * 0.7, Math.abs(y(0) - y(v)));
    ctx.save();
    ctx.fillStyle = '#374151';
    ctx.translate(x + slot * 0.35, canvas.height - pad.b + 12);
    ctx.rotate(-Math.PI / 8);
    ctx.fillText(String(chart.labels[i]).slice(0, 14), -20, 0);
    ctx.restore();
  });
}

function drawLine(canvas, chart) {
  const { ctx, pad, w, y } = axes(canvas, chart);
  const n = chart.series.length;
  const x = i => pad.l + (n === 1 ? w / 2 : (i / (n - 1)) * w);
  ctx.strokeStyle = chart.colors[0].css;
  ctx.lineWidth = 2;
  ctx.beginPath();
  chart.series.forEach((v, i) => i === 0 ? ctx.moveTo(x(i), y(v)) : ctx.lineTo(x(i), y(v)));
  ctx.stroke();
  ctx.fillStyle = '#374151';
  const step = Math.max(1, Math.ceil(n / 8));
  for (let i = 0; i < n; i += step) ctx.fillText(chart.labels[i], x(i) - 24, canvas.height - pad.b + 18);
}

// ---------------------------------------------------------------------------
// Boot
// ---------------------------------------------------------------------------
document.getElementById('toggle').onclick = () => post('/api/nav/toggle');
refresh();
</script>
</body>
</html>
"##;
