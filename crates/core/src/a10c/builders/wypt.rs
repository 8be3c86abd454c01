use crate::{
    a10c::{
        names::{CDU, MARKER_WYPT},
        pages::{self, WP_ELEV, WP_LAT, WP_LON, WP_NAME, WP_NEW},
        systems::wypt::{Axis, WaypointSettings, ddm_entry},
    },
    builder::{BuildContext, Builder},
    config::SystemSettings,
    error::BuildError,
    stream::CommandStream,
};

/// One CDU entry: scratchpad text and the line select key that commits it.
type Entry = (String, &'static str);

/// New CDU waypoints, in list order.
pub struct WaypointBuilder<'a> {
    ctx: &'a BuildContext,
    wypt: &'a WaypointSettings,
}

impl<'a> WaypointBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, wypt: &'a WaypointSettings) -> Self {
        Self { ctx, wypt }
    }

    /// Validate every waypoint up front so a bad one fails before anything is emitted.
    fn entries(&self) -> Result<Vec<Vec<Entry>>, BuildError> {
        self.wypt
            .waypoints
            .iter()
            .map(|w| -> Result<Vec<Entry>, BuildError> {
                let mut e = vec![
                    (w.checked_name()?, WP_NAME),
                    (ddm_entry(Axis::Latitude, &w.latitude)?, WP_LAT),
                    (ddm_entry(Axis::Longitude, &w.longitude)?, WP_LON),
                ];
                if let Some(elev) = w.checked_elevation()? {
                    e.push((elev.to_string(), WP_ELEV));
                }
                Ok(e)
            })
            .collect()
    }
}

impl Builder for WaypointBuilder<'_> {
    fn name(&self) -> &'static str {
        "WYPT"
    }

    fn validate(&self) -> Result<(), BuildError> {
        self.entries().map(drop)
    }

    fn build(&mut self, stream: &mut CommandStream) -> Result<(), BuildError> {
        if self.wypt.is_default() {
            return Ok(());
        }
        let waypoints = self.entries()?;

        stream.add_marker(MARKER_WYPT);
        stream.add_action(CDU, "WP")?;
        for entries in &waypoints {
            pages::cdu_clear_scratchpad(stream)?;
            stream.add_action(CDU, WP_NEW)?;
            for (text, lsk) in entries {
                pages::cdu_enter(stream, text, lsk)?;
            }
        }
        self.ctx
            .log
            .debug(&format!("[wypt] {} waypoints entered", waypoints.len()));
        stream.add_action(CDU, "NAV")
    }
}
