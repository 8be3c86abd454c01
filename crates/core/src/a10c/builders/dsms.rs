use crate::{
    a10c::{
        names::{LMFD, MARKER_DSMS},
        pages::{self, *},
        queries::{DsmsLoadoutQuery, DsmsProfileQuery, Loadout, cold_start_profiles},
        systems::dsms::{
            DsmsSettings, ESCAPE_MANEUVERS, Munition, MunitionSettings, NUM_STATIONS,
            RELEASE_MODES, mirror_station,
        },
    },
    builder::{BuildContext, Builder, FieldRow, PendingAdvance, check_fields, walk_fields},
    config::SystemSettings,
    error::BuildError,
    stream::CommandStream,
};

use super::check_laser_code;

/// Cursor-driven rows on the CHG SET page.
const CHG_SET_FIELDS: &[FieldRow<MunitionSettings>] = &[
    FieldRow::toggle("delivery_mode", |s| s.delivery_mode),
    FieldRow::cycle("escape_maneuver", ESCAPE_MANEUVERS, |s| s.escape_maneuver),
    FieldRow::cycle("release_mode", RELEASE_MODES, |s| s.release_mode),
];

const INV_ROWS_PER_PAGE: usize = DSMS_INV_ROWS.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// LOAD SYM: this station and its mirror in one go.
    Symmetric,
    /// LOAD STA: this station only.
    Single,
}

fn is_loaded(loaded: Option<&Loadout>, station: u8, m: Munition) -> bool {
    loaded
        .and_then(|l| l.get(&station))
        .and_then(|v| v.as_deref())
        .is_some_and(|name| name.eq_ignore_ascii_case(m.name()))
}

/// How `station` gets loaded. `None` when there is nothing to do: no munition configured,
/// already handled through its mirror, or the jet already carries it.
pub fn plan_station(
    dsms: &DsmsSettings,
    station: u8,
    loaded: Option<&Loadout>,
    handled: &[bool],
) -> Option<LoadKind> {
    let m = dsms.station(station)?;
    if handled.get(usize::from(station)).copied().unwrap_or(false)
        || is_loaded(loaded, station, m)
    {
        return None;
    }
    let mirror = mirror_station(station);
    let sym = mirror != station
        && m.symmetric_loadable()
        && dsms.station(mirror) == Some(m)
        && !handled.get(usize::from(mirror)).copied().unwrap_or(false)
        && !is_loaded(loaded, mirror, m);
    Some(if sym {
        LoadKind::Symmetric
    } else {
        LoadKind::Single
    })
}

/// The DSMS profile list as the builder has driven it so far, plus the list cursor.
#[derive(Debug, Clone)]
pub struct ProfileList {
    names: Vec<String>,
    cursor: usize,
}

impl ProfileList {
    pub fn new(names: Vec<String>) -> Self {
        Self { names, cursor: 0 }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn move_to(&mut self, stream: &mut CommandStream, ix: usize) -> Result<(), BuildError> {
        if ix > self.cursor {
            stream.add_repeated(LMFD, PROF_CURSOR_DN, ix - self.cursor)?;
        } else {
            stream.add_repeated(LMFD, PROF_CURSOR_UP, self.cursor - ix)?;
        }
        self.cursor = ix;
        Ok(())
    }

    /// Bubble the list into `target` order. Names in `target` go first, in that order; the
    /// rest keep their relative order below them. Each swap selects the upper row and
    /// presses MOVE DN, and the list is swapped with it so later swaps see the new order.
    ///
    /// Returns the number of swaps emitted.
    pub fn reorder(
        &mut self,
        stream: &mut CommandStream,
        target: &[String],
    ) -> Result<usize, BuildError> {
        let n = self.names.len();
        let mut keys: Vec<usize> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                target
                    .iter()
                    .position(|t| t.eq_ignore_ascii_case(name))
                    .unwrap_or(target.len() + i)
            })
            .collect();

        let mut swaps = 0;
        for pass in 0..n {
            let mut swapped = false;
            for j in 0..n.saturating_sub(pass + 1) {
                if keys[j] > keys[j + 1] {
                    self.move_to(stream, j)?;
                    stream.add_action(LMFD, PROF_MOVE_DN)?;
                    self.names.swap(j, j + 1);
                    keys.swap(j, j + 1);
                    self.cursor = j + 1;
                    swaps += 1;
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
        Ok(swaps)
    }
}

pub struct DsmsBuilder<'a> {
    ctx: &'a BuildContext,
    dsms: &'a DsmsSettings,
    loadout: DsmsLoadoutQuery,
    profiles: DsmsProfileQuery,
}

impl<'a> DsmsBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, dsms: &'a DsmsSettings) -> Self {
        Self {
            ctx,
            dsms,
            loadout: DsmsLoadoutQuery::new(),
            profiles: DsmsProfileQuery::new(),
        }
    }

    fn build_loadout(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        let loaded = self.loadout.loadout(self.ctx);
        let mut handled = [false; NUM_STATIONS as usize + 1];

        stream.add_action(LMFD, DSMS_INV)?;
        for station in 1..=NUM_STATIONS {
            let Some(kind) = plan_station(self.dsms, station, loaded, &handled) else {
                continue;
            };
            let Some(m) = self.dsms.station(station) else {
                continue;
            };
            handled[usize::from(station)] = true;

            stream.add_action(LMFD, DSMS_STATION_OSB[usize::from(station - 1)])?;
            let ix = m.inventory_index();
            stream.add_repeated(LMFD, DSMS_INV_NEXT, ix / INV_ROWS_PER_PAGE)?;
            stream.add_action(LMFD, DSMS_INV_ROWS[ix % INV_ROWS_PER_PAGE])?;
            match kind {
                LoadKind::Symmetric => {
                    handled[usize::from(mirror_station(station))] = true;
                    stream.add_action(LMFD, DSMS_LOAD_SYM)?;
                }
                LoadKind::Single => stream.add_action(LMFD, DSMS_LOAD_STA)?,
            }
            self.ctx.log.debug(&format!("[dsms] station {station}: {m} ({kind:?})"));
        }
        stream.add_action(LMFD, MFD_RTN)
    }

    /// Profile page and CHG SET page for one munition. Leaves the LMFD on the profile list.
    fn build_munition(
        &self,
        stream: &mut CommandStream,
        list: &mut ProfileList,
        m: Munition,
        s: &MunitionSettings,
    ) -> Result<(), BuildError> {
        let default = MunitionSettings::default_for(m);
        let s = &s.applicable_to(m);
        if *s == default {
            return Ok(());
        }
        let Some(ix) = list.position(m.default_profile()) else {
            self.ctx
                .log
                .warn(&format!("[dsms] no profile named {}, skipping its settings", m.default_profile()));
            return Ok(());
        };

        list.move_to(stream, ix)?;
        stream.add_action(LMFD, PROF_VIEW)?;

        if m.is_laser_guided() {
            if s.laser_code != default.laser_code {
                let code = check_laser_code(&s.laser_code)?;
                pages::ufc_enter(stream, code, LMFD, PROF_LASER_CODE)?;
            }
            if s.auto_lase != default.auto_lase {
                stream.add_action(LMFD, PROF_AUTO_LASE)?;
            }
            if s.lase_seconds != default.lase_seconds {
                pages::ufc_enter(stream, &s.lase_seconds.to_string(), LMFD, PROF_LASE_TIME)?;
            }
        }

        let mut chg = stream.child();
        if m.has_release_settings() {
            let mut pending = PendingAdvance::new(LMFD, CHG_SET_NEXT);
            walk_fields(&mut chg, &mut pending, CHG_SET_FIELDS, &default, s, LMFD, CHG_SET_CHANGE)?;
            if s.ripple_qty != default.ripple_qty {
                pages::ufc_enter(&mut chg, &s.ripple_qty.to_string(), LMFD, CHG_SET_RIPPLE_QTY)?;
            }
            if s.ripple_ft != default.ripple_ft {
                pages::ufc_enter(&mut chg, &s.ripple_ft.to_string(), LMFD, CHG_SET_RIPPLE_FT)?;
            }
        }
        if m.has_fuze_settings() {
            if s.hof != default.hof {
                pages::ufc_enter(&mut chg, &s.hof.to_string(), LMFD, CHG_SET_HOF)?;
            }
            if s.rpm != default.rpm {
                pages::ufc_enter(&mut chg, &s.rpm.to_string(), LMFD, CHG_SET_RPM)?;
            }
        }
        if !chg.is_empty() {
            stream.add_action(LMFD, PROF_CHG_SET)?;
            stream.append(chg);
            stream.add_action(LMFD, MFD_RTN)?;
        }

        stream.add_action(LMFD, MFD_RTN)
    }

    fn warn_unknown_profiles(&self, list: &ProfileList) {
        for name in &self.dsms.profile_order {
            if list.position(name).is_none() {
                self.ctx
                    .log
                    .warn(&format!("[dsms] no profile named {name}, left out of the reorder"));
            }
        }
    }
}

impl Builder for DsmsBuilder<'_> {
    fn name(&self) -> &'static str {
        "DSMS"
    }

    fn validate(&self) -> Result<(), BuildError> {
        for (m, s) in &self.dsms.munitions {
            let default = MunitionSettings::default_for(*m);
            let s = s.applicable_to(*m);
            if s.laser_code != default.laser_code {
                check_laser_code(&s.laser_code)?;
            }
            check_fields(CHG_SET_FIELDS, &default, &s)?;
        }
        Ok(())
    }

    fn build(&mut self, stream: &mut CommandStream) -> Result<(), BuildError> {
        if self.dsms.is_default() {
            return Ok(());
        }
        stream.add_marker(MARKER_DSMS);
        pages::lmfd_dsms(stream)?;

        if !self.dsms.loadout_is_default() {
            self.build_loadout(stream)?;
        }

        if self.dsms.profile_order.is_empty() && self.dsms.munitions_are_default() {
            return Ok(());
        }
        let names = self
            .profiles
            .profiles(self.ctx)
            .map(<[String]>::to_vec)
            .unwrap_or_else(cold_start_profiles);
        let mut list = ProfileList::new(names);

        stream.add_action(LMFD, DSMS_PROF)?;
        if !self.dsms.profile_order.is_empty() {
            self.warn_unknown_profiles(&list);
            let swaps = list.reorder(stream, &self.dsms.profile_order)?;
            self.ctx.log.debug(&format!("[dsms] profile reorder: {swaps} swaps"));
        }
        for (m, s) in &self.dsms.munitions {
            self.build_munition(stream, &mut list, *m, s)?;
        }
        stream.add_action(LMFD, MFD_RTN)
    }
}
