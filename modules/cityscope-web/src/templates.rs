/// Render the search page. The page is a static shell: the JS shim posts
/// input events to the controller and re-renders from `/api/state`, so every
/// presentation decision stays server-side in the view models.
pub fn render_search() -> String {
    let content = r#"
<div class="container">
    <div class="filters">
        <input type="number" id="min-population" class="filter-input" placeholder="Min Population">
        <input type="number" id="max-population" class="filter-input" placeholder="Max Population">
        <input type="text" id="country" class="filter-input" placeholder="Country">
    </div>

    <input type="text" id="search" class="search-input" placeholder="Search for a city..." autocomplete="off">

    <p id="loading" class="loading" hidden>Loading...</p>
    <p id="error" class="error" hidden></p>

    <div id="map"></div>

    <ul id="city-list" class="city-list"></ul>

    <div id="pagination" class="pagination" hidden>
        <button id="prev" class="page-button">Previous</button>
        <span id="page-info" class="page-info"></span>
        <button id="next" class="page-button">Next</button>
    </div>
</div>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script>
const map = L.map('map').setView([0, 0], 2);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
    attribution: '&copy; OpenStreetMap contributors',
    maxZoom: 18,
}).addTo(map);
let markers = L.layerGroup().addTo(map);

function render(state) {
    document.getElementById('loading').hidden = !state.loading;
    const error = document.getElementById('error');
    error.hidden = !state.error;
    error.textContent = state.error || '';

    const list = document.getElementById('city-list');
    list.innerHTML = '';
    state.cities.forEach(city => {
        const li = document.createElement('li');
        li.className = 'city-card' + (city.id === state.selectedId ? ' selected' : '');
        const name = document.createElement('h3');
        name.textContent = city.name;
        const country = document.createElement('p');
        country.textContent = city.country;
        const population = document.createElement('p');
        population.textContent = 'Population: ' + city.populationLabel;
        const location = document.createElement('p');
        location.textContent = 'Location: ' + city.locationLabel;
        li.append(name, country, population, location);
        li.onclick = () => post('/api/select', { id: city.id });
        list.appendChild(li);
    });

    markers.clearLayers();
    state.cities.forEach(city => {
        const m = L.marker([city.latitude, city.longitude]);
        m.bindPopup(`<h3>${city.name}</h3><p>${city.country}</p><p>Population: ${city.populationLabel}</p>`);
        markers.addLayer(m);
    });
    map.setView(state.map.center, state.map.zoom);

    document.getElementById('pagination').hidden = !state.pagination.visible;
    document.getElementById('page-info').textContent = state.pagination.label;
    document.getElementById('prev').disabled = !state.pagination.hasPrev;
    document.getElementById('next').disabled = !state.pagination.hasNext;

    // The fetch is debounced server-side; poll until it lands.
    if (state.loading) setTimeout(refresh, 300);
}

async function refresh() {
    const resp = await fetch('/api/state');
    render(await resp.json());
}

async function post(url, body) {
    const resp = await fetch(url, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body),
    });
    render(await resp.json());
    setTimeout(refresh, 650);
}

function filters() {
    const min = document.getElementById('min-population').value;
    const max = document.getElementById('max-population').value;
    return {
        minPopulation: Number(min) || 0,
        maxPopulation: max === '' ? null : Number(max),
        country: document.getElementById('country').value,
    };
}

document.getElementById('search').addEventListener('input', e => post('/api/query', { q: e.target.value }));
['min-population', 'max-population', 'country'].forEach(id =>
    document.getElementById(id).addEventListener('input', () => post('/api/filters', filters())));
document.getElementById('prev').onclick = () => post('/api/page', { direction: 'prev' });
document.getElementById('next').onclick = () => post('/api/page', { direction: 'next' });

refresh();
</script>
"#;

    build_page("Search", content)
}

// --- Helpers ---

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — Cities Explorer</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.header{{background:#1a1a1a;color:#fff;padding:12px 24px;display:flex;align-items:center;}}
.header h1{{font-size:18px;font-weight:600;}}
.container{{max-width:960px;margin:0 auto;padding:24px;}}
#map{{height:400px;border-radius:8px;margin-bottom:24px;border:1px solid #ddd;}}
.filters{{display:flex;gap:12px;margin-bottom:12px;}}
.filter-input{{flex:1;padding:8px 12px;border:1px solid #ddd;border-radius:4px;font-size:14px;}}
.search-input{{width:100%;padding:10px 14px;border:1px solid #ddd;border-radius:4px;font-size:15px;margin-bottom:16px;}}
.loading{{color:#888;font-size:14px;margin-bottom:12px;}}
.error{{background:#fce4ec;border:1px solid #f8bbd0;color:#c62828;padding:8px 12px;border-radius:4px;font-size:13px;margin-bottom:12px;}}
.city-list{{list-style:none;}}
.city-card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:12px;cursor:pointer;}}
.city-card:hover{{border-color:#999;}}
.city-card.selected{{border-color:#0066cc;}}
.city-card h3{{font-size:16px;margin-bottom:4px;}}
.city-card p{{color:#555;font-size:14px;}}
.pagination{{display:flex;gap:12px;align-items:center;justify-content:center;margin:16px 0;}}
.page-button{{padding:6px 16px;background:#0066cc;color:#fff;border:none;border-radius:4px;font-size:13px;cursor:pointer;}}
.page-button:disabled{{background:#ccc;cursor:default;}}
.page-info{{font-size:13px;color:#555;}}
</style>
</head>
<body>
<div class="header">
    <h1>Cities Explorer</h1>
</div>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_shell_contains_the_search_surface() {
        let html = render_search();
        assert!(html.contains("Search for a city..."));
        assert!(html.contains("Cities Explorer"));
        assert!(html.contains("id=\"map\""));
        assert!(html.contains("openstreetmap.org"));
    }

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(html_escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }
}
