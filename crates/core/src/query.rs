//! Query round trips: ship a stream ending in a `Query` command, block for one response.
//!
//! The transport is callback based; `run_query` bridges that into a bounded blocking wait
//! (`query_attempts` x `query_interval_ms`) and guarantees the response subscription is
//! gone by the time it returns, whatever the outcome. Each round trip gets a fresh query id,
//! so a reply arriving after its query gave up is dropped instead of answering the next one.

use crossbeam_channel::{bounded, select};
use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    builder::BuildContext,
    error::{BuildError, QueryError},
    stream::CommandStream,
};

/// Response value meaning "nothing here" (empty station, unknown entry).
pub const ABSENT_VALUE: &str = "---";

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);

fn next_query_id() -> u64 {
    NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed)
}

pub trait QueryBuilder {
    /// Receiver-side function answering this query.
    fn function(&self) -> &str;

    fn args(&self) -> Vec<String> {
        Vec::new()
    }

    /// Navigation needed before the receiver can answer (e.g. open a page).
    fn prelude(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        let _ = stream;
        Ok(())
    }

    /// Prelude, then exactly one trailing `Query` command tagged `id`.
    fn build(&self, stream: &mut CommandStream, id: u64) -> Result<(), BuildError> {
        self.prelude(stream)?;
        stream.add_query(self.function(), &self.args(), id);
        Ok(())
    }

    fn query(&self, ctx: &BuildContext) -> Result<String, QueryError> {
        run_query(self, ctx)
    }
}

pub fn run_query<Q: QueryBuilder + ?Sized>(q: &Q, ctx: &BuildContext) -> Result<String, QueryError> {
    let func = q.function().to_string();
    let id = next_query_id();
    let mut stream = ctx.stream();
    q.build(&mut stream, id)?;
    let wire = stream.to_wire()?;

    let (tx, rx) = bounded::<String>(1);
    let subscription = ctx.transport.subscribe_once(id, Box::new(move |resp| {
        let _ = tx.try_send(resp);
    }));

    if !ctx.transport.send(&wire) {
        drop(subscription);
        ctx.log.warn(&format!("[query:{func}] transport refused send"));
        return Err(QueryError::SendRefused { function: func });
    }

    let interval = ctx.settings.query_interval();
    for _ in 0..ctx.settings.query_attempts {
        select! {
            recv(rx) -> msg => match msg {
                Ok(resp) => {
                    drop(subscription);
                    ctx.log.debug(&format!("[query:{func}] response: {resp}"));
                    return Ok(resp);
                }
                Err(_) => break,
            },
            default(interval) => {},
        }
    }
    drop(subscription);

    let waited = ctx.settings.query_budget();
    ctx.log.warn(&format!("[query:{func}] no response after {waited:?}"));
    Err(QueryError::Timeout {
        function: func,
        waited,
    })
}

/// Split `k=v;k=v` into an ordered map. [`ABSENT_VALUE`] and empty values decode to `None`;
/// fragments without `=` are ignored.
pub fn parse_response_map(text: &str) -> IndexMap<String, Option<String>> {
    text.split(';')
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            let k = k.trim();
            if k.is_empty() {
                return None;
            }
            let v = v.trim();
            let v = (!v.is_empty() && v != ABSENT_VALUE).then(|| v.to_string());
            Some((k.to_string(), v))
        })
        .collect()
}

/// Result slot filled by the first successful round trip and kept for the owner's lifetime.
/// A failed fetch leaves it empty.
pub struct QueryCache<T> {
    cell: OnceCell<T>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn get_or_fetch<F>(&self, fetch: F) -> Result<&T, QueryError>
    where
        F: FnOnce() -> Result<T, QueryError>,
    {
        self.cell.get_or_try_init(fetch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{Catalog, Device},
        core_log::{CaptureLog, LogLevel},
        settings::UploadSettings,
        stream::Command,
        transport::{LoopbackTransport, Transport},
    };
    use std::{
        sync::Arc,
        time::{Duration, Instant},
    };

    struct Lookup;
    impl QueryBuilder for Lookup {
        fn function(&self) -> &str {
            "QueryLookup"
        }
        fn args(&self) -> Vec<String> {
            vec!["LMFD".into()]
        }
    }

    struct PagedLookup;
    impl QueryBuilder for PagedLookup {
        fn function(&self) -> &str {
            "QueryPaged"
        }
        fn prelude(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
            stream.add_action("LMFD", "OSB_14")
        }
    }

    fn ctx(transport: Arc<dyn Transport>, log: Arc<CaptureLog>) -> BuildContext {
        let catalog = Catalog::new("T").with_device(Device::new("LMFD", 2).with_actions(&["OSB_14"]));
        let settings = UploadSettings {
            query_attempts: 4,
            query_interval_ms: 10,
            ..UploadSettings::default()
        };
        BuildContext::new(Arc::new(catalog), transport, log, settings)
    }

    #[test]
    fn build_ends_in_exactly_one_query() {
        let c = ctx(Arc::new(LoopbackTransport::silent()), Arc::new(CaptureLog::new()));
        let mut s = c.stream();
        PagedLookup.build(&mut s, 9).unwrap();
        assert_eq!(s.len(), 2);
        assert!(s.commands()[0].is_action("LMFD", "OSB_14"));
        assert_eq!(
            s.commands()[1],
            Command::Query {
                func: "QueryPaged".into(),
                args: vec![],
                id: 9,
            }
        );
    }

    #[test]
    fn returns_the_response_text() {
        let t = Arc::new(
            LoopbackTransport::answering(|f, args| {
                (f == "QueryLookup" && args == ["LMFD"]).then(|| "1=GBU-12;2=---".to_string())
            })
            .with_delay(Duration::from_millis(5)),
        );
        let c = ctx(t.clone(), Arc::new(CaptureLog::new()));
        assert_eq!(Lookup.query(&c).unwrap(), "1=GBU-12;2=---");
        assert_eq!(t.hub().subscriber_count(), 0);
        assert_eq!(t.sent().len(), 1);
    }

    #[test]
    fn silent_transport_times_out_without_leaking_subscriptions() {
        let t = Arc::new(LoopbackTransport::silent());
        let log = Arc::new(CaptureLog::new());
        let c = ctx(t.clone(), log.clone());

        let start = Instant::now();
        let err = Lookup.query(&c).unwrap_err();
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert!(matches!(err, QueryError::Timeout { .. }));
        assert_eq!(t.hub().subscriber_count(), 0);
        assert!(log.contains(LogLevel::Warn, "[query:QueryLookup]"));
    }

    struct Named(&'static str);
    impl QueryBuilder for Named {
        fn function(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn late_reply_does_not_answer_the_next_query() {
        let t = Arc::new(
            LoopbackTransport::answering(|f, _| Some(format!("from={f}")))
                .with_delay(Duration::from_millis(60)),
        );
        let impatient = ctx(t.clone(), Arc::new(CaptureLog::new()));
        assert!(matches!(
            Named("QueryA").query(&impatient),
            Err(QueryError::Timeout { .. })
        ));

        // QueryA's reply lands while QueryB is still waiting on its own.
        let patient = BuildContext::new(
            Arc::clone(&impatient.catalog),
            t.clone(),
            Arc::new(CaptureLog::new()),
            UploadSettings {
                query_attempts: 20,
                query_interval_ms: 10,
                ..UploadSettings::default()
            },
        );
        assert_eq!(Named("QueryB").query(&patient).unwrap(), "from=QueryB");
        assert_eq!(t.hub().subscriber_count(), 0);
    }

    #[test]
    fn refused_send_fails_fast() {
        let t = Arc::new(LoopbackTransport::silent());
        t.refuse_sends(true);
        let c = ctx(t.clone(), Arc::new(CaptureLog::new()));
        assert!(matches!(Lookup.query(&c), Err(QueryError::SendRefused { .. })));
        assert_eq!(t.hub().subscriber_count(), 0);
    }

    #[test]
    fn response_map_decodes_absent_values() {
        let m = parse_response_map("3=GBU-12; 9=GBU-12;5=---;6=;junk;=x");
        assert_eq!(m.len(), 4);
        assert_eq!(m["3"].as_deref(), Some("GBU-12"));
        assert_eq!(m["5"], None);
        assert_eq!(m["6"], None);
        assert_eq!(m.keys().collect::<Vec<_>>(), ["3", "9", "5", "6"]);
    }

    #[test]
    fn cache_fetches_once_and_skips_failures() {
        let cache: QueryCache<u32> = QueryCache::new();
        let err = cache.get_or_fetch(|| {
            Err(QueryError::SendRefused {
                function: "x".into(),
            })
        });
        assert!(err.is_err());
        assert!(cache.get().is_none());
        assert_eq!(*cache.get_or_fetch(|| Ok(7)).unwrap(), 7);
        assert_eq!(*cache.get_or_fetch(|| Ok(8)).unwrap(), 7);
    }
}
