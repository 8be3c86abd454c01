//! A-10C queries. A failed round trip is logged and reads as "no information"; callers fall
//! back to cold-start assumptions.

use indexmap::IndexMap;

use crate::{
    a10c::{
        names::{QUERY_DSMS_LOADOUT, QUERY_DSMS_PROFILES, QUERY_PREFLIGHT},
        pages,
        systems::dsms::{Munition, NUM_STATIONS},
    },
    builder::BuildContext,
    error::BuildError,
    query::{QueryBuilder, QueryCache, parse_response_map},
    stream::CommandStream,
};

/// Receiver readiness check run before an upload.
pub struct PreflightQuery;

impl QueryBuilder for PreflightQuery {
    fn function(&self) -> &str {
        QUERY_PREFLIGHT
    }
}

/// Station number to the munition name the jet reports there (`None` for empty).
pub type Loadout = IndexMap<u8, Option<String>>;

/// `1=GBU-12;2=---;...` from the DSMS status page.
#[derive(Default)]
pub struct DsmsLoadoutQuery {
    cache: QueryCache<Loadout>,
}

impl DsmsLoadoutQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loadout(&self, ctx: &BuildContext) -> Option<&Loadout> {
        match self
            .cache
            .get_or_fetch(|| self.query(ctx).map(|r| parse_loadout(&r)))
        {
            Ok(l) => Some(l),
            Err(e) => {
                ctx.log.warn(&format!("[dsms] loadout unknown, assuming empty: {e}"));
                None
            }
        }
    }
}

impl QueryBuilder for DsmsLoadoutQuery {
    fn function(&self) -> &str {
        QUERY_DSMS_LOADOUT
    }

    fn prelude(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        pages::lmfd_dsms(stream)
    }
}

pub fn parse_loadout(text: &str) -> Loadout {
    parse_response_map(text)
        .into_iter()
        .filter_map(|(k, v)| {
            let station = k.parse::<u8>().ok()?;
            (1..=NUM_STATIONS).contains(&station).then_some((station, v))
        })
        .collect()
}

/// `GBU-12=0;MK-82=1;...` from the DSMS profile list, answered as names in list order.
#[derive(Default)]
pub struct DsmsProfileQuery {
    cache: QueryCache<Vec<String>>,
}

impl DsmsProfileQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profiles(&self, ctx: &BuildContext) -> Option<&[String]> {
        match self
            .cache
            .get_or_fetch(|| self.query(ctx).map(|r| parse_profiles(&r)))
        {
            Ok(p) => Some(p.as_slice()),
            Err(e) => {
                ctx.log.warn(&format!("[dsms] profile list unknown, assuming cold start: {e}"));
                None
            }
        }
    }
}

impl QueryBuilder for DsmsProfileQuery {
    fn function(&self) -> &str {
        QUERY_DSMS_PROFILES
    }

    fn prelude(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        pages::lmfd_dsms_profiles(stream)
    }
}

pub fn parse_profiles(text: &str) -> Vec<String> {
    let mut rows: Vec<(usize, String)> = parse_response_map(text)
        .into_iter()
        .filter_map(|(name, ix)| Some((ix?.parse::<usize>().ok()?, name)))
        .collect();
    rows.sort_by_key(|(ix, _)| *ix);
    rows.into_iter().map(|(_, name)| name).collect()
}

/// Profile list of a freshly started jet.
pub fn cold_start_profiles() -> Vec<String> {
    Munition::ALL
        .iter()
        .filter(|m| m.has_profile())
        .map(|m| m.default_profile().to_string())
        .collect()
}
