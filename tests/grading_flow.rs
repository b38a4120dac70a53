use hidraseries::{
    network::{FittingSpec, SegmentSpec},
    piping::{DiameterMode, FittingType, Material, Schedule},
    ExerciseConfig, ExerciseFingerprint, GradingSession, HydraulicsError, KeyValueStore,
    MemoryStore, SessionError, Tier,
};

fn steel_sch40(nps: &str, length_m: f64) -> SegmentSpec {
    SegmentSpec {
        material: Material::Steel,
        diameter_mode: DiameterMode::Schedule(Schedule::Schedule40),
        declared_diameter_m: None,
        nominal_size: Some(nps.into()),
        length_m,
    }
}

fn water_line() -> ExerciseConfig {
    ExerciseConfig {
        density_kg_per_m3: 1000.0,
        kinematic_viscosity_m2_per_s: 1e-6,
        flow_rate_m3_per_s: 0.01,
        segments: vec![steel_sch40("2", 10.0)],
        fittings: vec![],
    }
}

#[test]
fn steel_line_grades_each_tier() {
    let mut session = GradingSession::new(MemoryStore::default());
    let cfg = water_line();

    let green = session.submit(&cfg, Some(4.22)).expect("green attempt");
    let seg = &green.losses.segments[0];
    assert!((seg.inner_diameter_m - 0.0525018).abs() < 1e-9);
    assert!((seg.velocity_m_per_s - 4.619).abs() < 1e-3);
    assert!((seg.reynolds - 242_513.5).abs() < 1.0);
    assert!((seg.friction_factor - 0.02036).abs() < 1e-4, "f={}", seg.friction_factor);
    assert!(
        (green.losses.total_loss_m - 4.2179).abs() < 1e-3,
        "h_L={}",
        green.losses.total_loss_m
    );
    assert_eq!(green.outcome.tier, Tier::Green);

    let yellow = session.submit(&cfg, Some(4.6)).expect("yellow attempt");
    assert_eq!(yellow.outcome.tier, Tier::Yellow);
    assert!((yellow.outcome.relative_error_percent - 9.06).abs() < 0.1);

    let red = session.submit(&cfg, Some(5.0)).expect("red attempt");
    assert_eq!(red.outcome.tier, Tier::Red);
    let red_low = session.submit(&cfg, Some(2.15)).expect("red attempt");
    assert_eq!(red_low.outcome.tier, Tier::Red);

    let stats = session.summary(&cfg).expect("summary");
    assert_eq!((stats.attempts, stats.green, stats.yellow, stats.red), (4, 1, 1, 2));
    assert_eq!(stats.dominant_tier(), Some(Tier::Red));
    assert_eq!(red_low.stats, stats);
}

#[test]
fn fittings_add_minor_losses_on_top_of_pipe_friction() {
    let mut cfg = water_line();
    cfg.fittings = vec![
        FittingSpec {
            fitting: FittingType::Elbow90,
            count: 2,
            segment: 0,
        },
        FittingSpec {
            fitting: FittingType::GateValve,
            count: 1,
            segment: 0,
        },
    ];
    let mut session = GradingSession::new(MemoryStore::default());
    let report = session.submit(&cfg, Some(6.0)).expect("attempt");
    let v = report.losses.segments[0].velocity_m_per_s;
    let expected_minor = (2.0 * 0.95 + 0.2) * v * v / (2.0 * 9.81);
    assert!((report.losses.minor_loss_total_m - expected_minor).abs() < 1e-9);
    assert!(
        (report.losses.total_loss_m
            - (report.losses.major_loss_total_m + report.losses.minor_loss_total_m))
            .abs()
            < 1e-12
    );
}

#[test]
fn missing_schedule_size_is_reported_and_not_recorded() {
    let mut cfg = water_line();
    cfg.segments = vec![SegmentSpec {
        diameter_mode: DiameterMode::Schedule(Schedule::Schedule60),
        ..steel_sch40("0.75", 5.0)
    }];
    let mut store = MemoryStore::default();
    let mut session = GradingSession::new(&mut store);
    let err = session.submit(&cfg, Some(1.0)).unwrap_err();
    assert!(
        matches!(
            &err,
            SessionError::Hydraulics(HydraulicsError::MissingScheduleEntry { schedule, nominal_size })
                if *schedule == Schedule::Schedule60 && nominal_size == "0.75"
        ),
        "{err}"
    );
    drop(session);
    assert!(store.is_empty());
}

#[test]
fn fitting_on_nonexistent_segment_is_rejected() {
    let mut cfg = water_line();
    cfg.segments.push(steel_sch40("1.5", 4.0));
    cfg.fittings.push(FittingSpec {
        fitting: FittingType::TeeBranch,
        count: 1,
        segment: 5,
    });
    let mut store = MemoryStore::default();
    let mut session = GradingSession::new(&mut store);
    let err = session.submit(&cfg, Some(1.0)).unwrap_err();
    assert!(
        matches!(err, SessionError::Hydraulics(HydraulicsError::InvalidInput(_))),
        "{err}"
    );
    drop(session);
    assert!(store.is_empty());
}

#[test]
fn absent_answer_fails_but_zero_answer_is_graded() {
    let cfg = water_line();
    let mut store = MemoryStore::default();
    {
        let mut session = GradingSession::new(&mut store);
        let err = session.submit(&cfg, None).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Hydraulics(HydraulicsError::InvalidInput(_))
        ));
    }
    assert!(store.is_empty());

    let mut session = GradingSession::new(&mut store);
    let report = session.submit(&cfg, Some(0.0)).expect("zero is a valid answer");
    assert_eq!(report.outcome.tier, Tier::Red);
    assert!((report.outcome.relative_error_percent - 100.0).abs() < 1e-9);
    drop(session);
    assert_eq!(store.len(), 1);
}

#[test]
fn statistics_are_kept_per_configuration() {
    let a = water_line();
    let mut b = water_line();
    b.segments[0].length_m = 12.0;
    let mut session = GradingSession::new(MemoryStore::default());
    session.submit(&a, Some(4.22)).expect("attempt a");
    session.submit(&b, Some(4.22)).expect("attempt b");
    session.submit(&b, Some(4.22)).expect("attempt b");
    assert_eq!(session.summary(&a).expect("a").attempts, 1);
    assert_eq!(session.summary(&b).expect("b").attempts, 2);

    let key = ExerciseFingerprint::of(&a).expect("fingerprint").storage_key();
    assert!(key.starts_with("hidraseries_stats_"));
    assert!(session.tracker().store().get(&key).is_some());
}
