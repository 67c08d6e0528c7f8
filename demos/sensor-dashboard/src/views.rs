//! Text renderings of the dashboard views.

use waypoint::pages::{NotFound, ResolvedRoute};
use waypoint::ViewRegistry;

/// Sample readings shown by both views: (sensor, temperature °C, humidity %).
const READINGS: &[(&str, f32, u8)] = &[
	("greenhouse-1", 24.5, 61),
	("greenhouse-2", 22.1, 58),
	("cold-storage", 3.8, 80),
];

pub fn dashboard() -> ViewRegistry<String> {
	ViewRegistry::new()
		.view("SensorData", sensor_data)
		.view("SensorChart", sensor_chart)
		.not_found(|missing: &NotFound| format!("404: nothing at {}", missing.request()))
}

/// Readings table, optionally filtered with `?sensor=<name>`.
fn sensor_data(route: &ResolvedRoute) -> String {
	let filter = route.location().query_value("sensor");
	let rows: Vec<String> = READINGS
		.iter()
		.filter(|(name, _, _)| filter.as_deref().is_none_or(|wanted| wanted == *name))
		.map(|(name, temperature, humidity)| format!("{name}={temperature:.1}C/{humidity}%"))
		.collect();

	format!("[SensorData] {}", rows.join(", "))
}

/// One bar per sensor, scaled to temperature.
fn sensor_chart(_route: &ResolvedRoute) -> String {
	let bars: Vec<String> = READINGS
		.iter()
		.map(|(name, temperature, _)| {
			let width = temperature.max(0.0).round() as usize / 2;
			format!("{name} {}", "#".repeat(width.max(1)))
		})
		.collect();

	format!("[SensorChart] {}", bars.join(" | "))
}
