use std::sync::Arc;

use jafdtc_core::a10c::{
    builders::{
        DsmsBuilder, HmcsBuilder, IffccBuilder, RadioBuilder, TadBuilder, TgpBuilder,
        WaypointBuilder,
    },
    names::{QUERY_DSMS_LOADOUT, QUERY_DSMS_PROFILES},
    pages::{DSMS_INV, DSMS_LOAD_STA, DSMS_LOAD_SYM, MFD_RTN},
    systems::{Munition, MunitionSettings, RadioPreset},
};
use jafdtc_core::core_log::CaptureLog;
use jafdtc_core::prelude::*;

fn context(transport: LoopbackTransport) -> BuildContext {
    let settings = UploadSettings {
        base_wait_ms: 0,
        query_attempts: 3,
        query_interval_ms: 10,
        ..UploadSettings::default()
    };
    BuildContext::new(
        Arc::clone(&A10C_CATALOG),
        Arc::new(transport),
        Arc::new(CaptureLog::new()),
        settings,
    )
}

fn position(labels: &[String], from: usize, label: &str) -> Option<usize> {
    labels[from..].iter().position(|l| l == label).map(|i| i + from)
}

/// Start of the first contiguous occurrence of `run` in `labels`.
fn find_run(labels: &[String], run: &[&str]) -> Option<usize> {
    labels
        .windows(run.len())
        .position(|w| w.iter().zip(run).all(|(a, b)| a == b))
}

#[test]
fn single_arc210_preset() {
    let ctx = context(LoopbackTransport::silent());
    let mut cfg = A10CConfiguration::new("Radio");
    cfg.radio
        .arc210_presets
        .push(RadioPreset::new(3, "251.000", "TWR"));

    let mut s = ctx.stream();
    RadioBuilder::new(&ctx, &cfg.radio).build(&mut s).unwrap();
    let labels = s.labels();

    // preset table page
    let nav = find_run(&labels, &["CDU.SYS", "CDU.LSK_7R", "CDU.LSK_3R"]).unwrap();
    // preset slot, frequency, description, in that order
    let slot = find_run(&labels, &["CDU.3", "CDU.LSK_3L"]).unwrap();
    let freq = find_run(
        &labels,
        &["CDU.2", "CDU.5", "CDU.1", "CDU.0", "CDU.0", "CDU.0", "CDU.LSK_5L"],
    )
    .unwrap();
    let desc = find_run(&labels, &["CDU.T", "CDU.W", "CDU.R", "CDU.LSK_7L"]).unwrap();
    assert!(nav < slot && slot < freq && freq < desc);

    // nothing touches another slot
    for lsk in ["CDU.LSK_3L", "CDU.LSK_5L", "CDU.LSK_7L"] {
        assert_eq!(labels.iter().filter(|l| *l == lsk).count(), 1, "{lsk}");
    }
    // the slot number is the only thing typed on the preset page before LSK 3L
    assert_eq!(slot, nav + 3);
}

#[test]
fn mirrored_gbu12_pair_loads_symmetrically_once() {
    let transport = LoopbackTransport::answering(|func, _| match func {
        f if f == QUERY_DSMS_LOADOUT => Some("3=---;9=---".into()),
        f if f == QUERY_DSMS_PROFILES => Some("GBU-12=0;MK-82=1".into()),
        _ => None,
    });
    let ctx = context(transport);

    let mut cfg = A10CConfiguration::new("Strike");
    cfg.dsms.set_station(3, Some(Munition::Gbu12));
    cfg.dsms.set_station(9, Some(Munition::Gbu12));
    let mut gbu = MunitionSettings::default_for(Munition::Gbu12);
    gbu.laser_code = "1511".into();
    cfg.dsms.munitions.insert(Munition::Gbu12, gbu);

    let mut s = ctx.stream();
    DsmsBuilder::new(&ctx, &cfg.dsms).build(&mut s).unwrap();
    let labels = s.labels();

    let inv = position(&labels, 0, &format!("LMFD.{DSMS_INV}")).unwrap();
    let rtn = position(&labels, inv, &format!("LMFD.{MFD_RTN}")).unwrap();
    let loading = &labels[inv..rtn];
    let sym = format!("LMFD.{DSMS_LOAD_SYM}");
    let sta = format!("LMFD.{DSMS_LOAD_STA}");
    assert_eq!(loading.iter().filter(|l| **l == sym).count(), 1);
    assert_eq!(loading.iter().filter(|l| **l == sta).count(), 0);
    // station 3's button, never station 9's
    assert!(loading.iter().any(|l| l == "LMFD.OSB_08"));
    assert!(!loading.iter().any(|l| l == "LMFD.OSB_18"));

    // laser code typed once after the loadout
    assert!(find_run(&labels[rtn..], &["UFC.1", "UFC.5", "UFC.1", "UFC.1", "LMFD.OSB_03"]).is_some());
}

#[test]
fn loaded_pair_is_left_alone() {
    let transport = LoopbackTransport::answering(|func, _| {
        (func == QUERY_DSMS_LOADOUT).then(|| "3=GBU-12;9=GBU-12".to_string())
    });
    let ctx = context(transport);
    let mut cfg = A10CConfiguration::new("Loaded");
    cfg.dsms.set_station(3, Some(Munition::Gbu12));
    cfg.dsms.set_station(9, Some(Munition::Gbu12));

    let mut s = ctx.stream();
    DsmsBuilder::new(&ctx, &cfg.dsms).build(&mut s).unwrap();
    let labels = s.labels();
    assert!(!labels.iter().any(|l| l == &format!("LMFD.{DSMS_LOAD_SYM}")));
    assert!(!labels.iter().any(|l| l == &format!("LMFD.{DSMS_LOAD_STA}")));
}

#[test]
fn every_default_system_emits_nothing() {
    let ctx = context(LoopbackTransport::silent());
    let cfg = A10CConfiguration::new("Cold");
    let mut builders: Vec<Box<dyn Builder + '_>> = vec![
        Box::new(DsmsBuilder::new(&ctx, &cfg.dsms)),
        Box::new(HmcsBuilder::new(&ctx, &cfg.hmcs)),
        Box::new(IffccBuilder::new(&ctx, &cfg.iffcc)),
        Box::new(RadioBuilder::new(&ctx, &cfg.radio)),
        Box::new(TadBuilder::new(&ctx, &cfg.tad)),
        Box::new(TgpBuilder::new(&ctx, &cfg.tgp)),
        Box::new(WaypointBuilder::new(&ctx, &cfg.wypt)),
    ];
    for b in builders.iter_mut() {
        let mut s = ctx.stream();
        b.build(&mut s).unwrap();
        assert!(s.is_empty(), "{} emitted {:?}", b.name(), s.commands());
    }
}

#[test]
fn full_upload_reaches_the_transport_once() {
    let transport = Arc::new(LoopbackTransport::answering(|func, _| {
        (func == QUERY_DSMS_PROFILES).then(|| "MK-82=0;GBU-12=1;CBU-97=2".to_string())
    }));
    let mut cfg = A10CConfiguration::new("Full");
    cfg.dsms.profile_order = vec!["CBU-97".into()];
    cfg.tgp.video_mode = 0;
    cfg.radio
        .arc210_presets
        .push(RadioPreset::new(1, "133.000", "APP"));

    let log = Arc::new(CaptureLog::new());
    let agent = A10CUploadAgent::new(
        &cfg,
        transport.clone(),
        log.clone(),
        UploadSettings {
            query_attempts: 3,
            query_interval_ms: 10,
            ..UploadSettings::default()
        },
    );
    agent.load().unwrap();

    let sent = transport.sent();
    // profile query, then the upload
    assert_eq!(sent.len(), 2);
    assert!(LoopbackTransport::query_of(&sent[0]).is_some());
    let upload: Vec<serde_json::Value> = serde_json::from_str(&sent[1]).unwrap();
    assert_eq!(upload.first().unwrap()["a"]["tag"], "upload");
    assert_eq!(upload.last().unwrap()["a"]["tag"], "end");
    assert_eq!(transport.hub().subscriber_count(), 0);
}
