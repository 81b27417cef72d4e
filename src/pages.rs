//! HTML generation for the dashboard pages.
//!
//! Plain string builders, one function per page, all wrapped in a common
//! shell with the navbar. The live factory page refreshes itself; everything
//! else renders once per request.

use crate::cycle::CycleReport;
use crate::mission::{MissionState, MISSIONS};

const STYLE: &str = r#"
:root { color-scheme: dark; }
body { margin: 0; background: #242424; color: rgba(255,255,255,0.87); font-family: Inter, Avenir, Helvetica, Arial, sans-serif; }
nav.navbar { display: flex; justify-content: space-between; align-items: center; padding: 12px 24px; background: #1a1a1a; }
nav.navbar a { color: #646cff; text-decoration: none; margin-left: 16px; }
nav.navbar .brand a { font-weight: 600; font-size: 1.1em; margin-left: 0; }
main { padding: 24px; display: flex; gap: 1rem; flex-wrap: wrap; }
h2 { color: #61dafb; }
.panel { background: rgba(255,255,255,0.05); padding: 15px; border-radius: 16px; box-shadow: 0 0 10px rgba(122,92,255,0.3); }
.panel.side { flex: 1; max-height: 600px; overflow-y: auto; }
ul.missions li { cursor: pointer; margin: 6px 0; }
ul.missions a { color: rgba(255,255,255,0.87); text-decoration: none; }
ul.anomalies li { color: #646cff; }
.map-surface { width: 600px; height: 400px; background: #ffffff; border-radius: 8px; }
.error { color: #e03131; }
pre.raw { background: #1a1a1a; padding: 12px; border-radius: 8px; overflow-x: auto; }
table.bands { border-collapse: collapse; }
table.bands td, table.bands th { border-bottom: 1px solid rgba(255,255,255,0.15); padding: 6px 12px; text-align: left; }
a.nav-button, button.start-button { display: inline-block; margin-top: 12px; padding: 8px 16px; border-radius: 8px; background: #646cff; color: #fff; text-decoration: none; border: 0; cursor: pointer; }
"#;

fn page_shell(title: &str, head_extra: &str, body: &str) -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"UTF-8\">\n");
    page.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    page.push_str(head_extra);
    page.push_str(&format!("<style>{}</style>\n", STYLE));
    page.push_str("</head>\n<body>\n");
    page.push_str(
        "<nav class=\"navbar\"><div class=\"brand\"><a href=\"/\">Training Dashboard</a></div>\
         <div><a href=\"/\">Home</a><a href=\"/missions\">Training Missions</a>\
         <a href=\"/factory\">Live Factory Map</a></div></nav>\n",
    );
    page.push_str("<main>\n");
    page.push_str(body);
    page.push_str("\n</main>\n</body>\n</html>\n");
    page
}

fn mission_list() -> String {
    let mut out = String::from("<div class=\"panel\"><h2>Training Missions</h2><ul class=\"missions\">");
    for mission in MISSIONS {
        out.push_str(&format!(
            "<li><a href=\"/missions?mission={}\">{}</a></li>",
            url_encode(mission),
            html_escape(mission),
        ));
    }
    out.push_str("</ul></div>");
    out
}

/// Anomaly description list. Empty list, no panel at all.
pub fn descriptions_panel(descriptions: &[String]) -> String {
    if descriptions.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"panel side\"><h2>Active Anomalies</h2><ul class=\"anomalies\">");
    for desc in descriptions {
        out.push_str(&format!("<li>{}</li>", html_escape(desc)));
    }
    out.push_str("</ul></div>");
    out
}

pub fn home_page(map_svg: &str, descriptions: &[String]) -> String {
    let mut body = mission_list();
    body.push_str(&format!(
        "<div class=\"panel\"><h2>Live Factory Map</h2><div class=\"map-surface\">{}</div>\
         <a class=\"nav-button\" href=\"/factory\">Open live view</a> \
         <a class=\"nav-button\" href=\"/run-cycle\">Run cycle</a></div>",
        map_svg,
    ));
    body.push_str(&descriptions_panel(descriptions));
    page_shell("Training Dashboard", "", &body)
}

pub fn factory_page(map_svg: &str, descriptions: &[String]) -> String {
    let mut body = format!(
        "<div class=\"panel\"><h2>Live Factory Map</h2><div class=\"map-surface\">{}</div></div>",
        map_svg,
    );
    body.push_str(&descriptions_panel(descriptions));
    // The page re-fetches itself once per poll interval.
    page_shell("Live Factory Map", "<meta http-equiv=\"refresh\" content=\"1\">\n", &body)
}

pub fn mission_page(state: &MissionState) -> String {
    let mut body = mission_list();
    body.push_str("<div class=\"panel side\"><h2>Mission Details</h2>");
    match state {
        MissionState::Unselected => {
            body.push_str("<p>Please select a mission to view details.</p>");
        }
        MissionState::Selected { name } | MissionState::Loading { name } => {
            body.push_str(&format!("<p>Loading {}...</p>", html_escape(name)));
        }
        MissionState::LoadFailed { message, .. } => {
            body.push_str(&format!("<p class=\"error\">{}</p>", html_escape(message)));
        }
        MissionState::Loaded { name, briefing } => {
            body.push_str(&format!("<h3>{}</h3>", html_escape(name)));
            body.push_str(&format!("<p>{}</p>", html_escape(briefing)));
            body.push_str(&format!(
                "<a class=\"nav-button\" href=\"/simulate?scenario={}\">Would you like to start a simulation?</a>",
                url_encode(name),
            ));
        }
    }
    body.push_str("</div>");
    page_shell("Training Missions", "", &body)
}

pub fn simulate_page(scenario: Option<&str>) -> String {
    let body = match scenario {
        Some(name) => format!(
            "<div class=\"panel\"><h2>Starting Simulation</h2><p>Scenario: {}</p>\
             <button class=\"start-button\">Launch Scenario</button></div>",
            html_escape(name),
        ),
        None => String::from(
            "<div class=\"panel\"><h2>Would you like to start a simulation?</h2>\
             <button class=\"start-button\">Yes</button> <a class=\"nav-button\" href=\"/\">No</a></div>",
        ),
    };
    page_shell("Training Mission", "", &body)
}

pub fn cycle_page(report: &CycleReport) -> String {
    let raw = serde_json::to_string_pretty(&report.record)
        .unwrap_or_else(|_| "{}".to_string());
    let mut body = format!(
        "<div class=\"panel\"><h2>Run Cycle: {}</h2><pre class=\"raw\">{}</pre></div>",
        html_escape(&report.record.machine),
        html_escape(&raw),
    );
    body.push_str("<div class=\"panel side\"><h2>Readings</h2><table class=\"bands\">");
    body.push_str("<tr><th>Reading</th><th>Status</th><th>Detail</th></tr>");
    for (field, band) in &report.bands {
        body.push_str(&format!(
            "<tr><td>{}</td><td style=\"color:{}\">{}</td><td>{}</td></tr>",
            html_escape(field),
            band.level.color(),
            html_escape(band.label),
            html_escape(band.detail),
        ));
    }
    body.push_str("</table></div>");
    page_shell("Run Cycle", "", &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<div class=\"panel\"><h2>{}</h2><p class=\"error\">{}</p></div>",
        html_escape(title),
        html_escape(message),
    );
    page_shell(title, "", &body)
}

pub fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn url_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TelemetryRecord;

    #[test]
    fn empty_descriptions_render_no_panel() {
        assert_eq!(descriptions_panel(&[]), "");
        let page = factory_page("<svg></svg>", &[]);
        assert!(!page.contains("Active Anomalies"));
    }

    #[test]
    fn descriptions_render_as_list_items() {
        let descs = vec!["first".to_string(), "second".to_string()];
        let panel = descriptions_panel(&descs);
        assert!(panel.contains("Active Anomalies"));
        assert!(panel.contains("<li>first</li>"));
        assert!(panel.contains("<li>second</li>"));
    }

    #[test]
    fn factory_page_refreshes_itself() {
        let page = factory_page("<svg></svg>", &[]);
        assert!(page.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn mission_page_states() {
        let page = mission_page(&MissionState::Unselected);
        assert!(page.contains("Please select a mission"));

        let failed = MissionState::LoadFailed {
            name: "Cyberattack".to_string(),
            message: "Failed to load mission information".to_string(),
        };
        let page = mission_page(&failed);
        assert!(page.contains("class=\"error\""));
        assert!(page.contains("Failed to load mission information"));

        let loaded = MissionState::Loaded {
            name: "Cyberattack".to_string(),
            briefing: "Defend the line.".to_string(),
        };
        let page = mission_page(&loaded);
        assert!(page.contains("Defend the line."));
        assert!(page.contains("/simulate?scenario=Cyberattack"));
    }

    #[test]
    fn cycle_page_shows_raw_and_bands() {
        let record = TelemetryRecord {
            machine: "CNC_Mill_1".to_string(),
            spindle_temp: Some(95.0),
            ..Default::default()
        };
        let page = cycle_page(&crate::cycle::CycleReport::build(record));
        assert!(page.contains("CNC_Mill_1"));
        assert!(page.contains("Warning! High temperature"));
        assert!(page.contains("spindle_temp"));
    }

    #[test]
    fn url_encode_escapes_spaces() {
        assert_eq!(url_encode("Normal Operation"), "Normal%20Operation");
    }
}
