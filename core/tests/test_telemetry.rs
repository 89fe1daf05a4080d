#[cfg(test)]
mod telemetry_tests {
    use std::time::Duration;

    use ctr_core::constants::test_vectors::{IV, KEY_128};
    use ctr_core::crypto::CipherSession;
    use ctr_core::engine::Variant;
    use ctr_core::telemetry::{
        throughput_mib_per_sec, Stage, StageTimes, TelemetrySnapshot, TelemetryTimer, TransformCounters, WorkerCounters,
    };

    fn make_timer() -> TelemetryTimer {
        let mut timer = TelemetryTimer::new();
        std::thread::sleep(Duration::from_millis(20)); // ensure elapsed > stage times
        timer.add_stage_time(Stage::Parallel, Duration::from_millis(5));
        timer.add_stage_time(Stage::Tail, Duration::from_millis(1));
        timer.finish();
        timer
    }

    #[test]
    fn stage_times_accumulate() {
        let mut times = StageTimes::default();
        times.add(Stage::Parallel, Duration::from_millis(2));
        times.add(Stage::Parallel, Duration::from_millis(3));
        assert_eq!(times.get(Stage::Parallel), Duration::from_millis(5));
        assert_eq!(times.get(Stage::Verify), Duration::ZERO);
        assert!(times.has_all(&[Stage::Parallel]));
        assert!(!times.has_all(&[Stage::Parallel, Stage::Tail]));
    }

    #[test]
    fn stage_times_merge_and_summary() {
        let mut a = StageTimes::default();
        a.add(Stage::Partition, Duration::from_micros(10));
        let mut b = StageTimes::default();
        b.add(Stage::Partition, Duration::from_micros(5));
        b.add(Stage::Tail, Duration::from_micros(1));
        a.merge(&b);

        assert_eq!(a.get(Stage::Partition), Duration::from_micros(15));
        assert_eq!(a.total(), Duration::from_micros(16));
        assert_eq!(a.summary(), "partition=15.0µs tail=1.0µs");
    }

    #[test]
    fn worker_counters_merge() {
        let mut totals = TransformCounters::default();
        totals.add_worker(&WorkerCounters { worker_id: 0, blocks: 4 });
        totals.add_worker(&WorkerCounters { worker_id: 1, blocks: 0 });
        totals.add_tail(3);

        assert_eq!(totals.blocks, 4);
        assert_eq!(totals.workers, 2);
        assert_eq!(totals.idle_workers, 1);
        assert_eq!(totals.counter_advance(), 5);

        let mut sum = totals.clone();
        sum += totals;
        assert_eq!(sum.blocks, 8);
        assert_eq!(sum.tail_bytes, 6);
    }

    #[test]
    fn snapshot_sanity_and_throughput() {
        let counters = TransformCounters { bytes: 2 * 1024 * 1024, ..Default::default() };
        let timer = make_timer();
        let snapshot = TelemetrySnapshot::from(&counters, &timer);

        assert!(snapshot.sanity_check());
        assert!(snapshot.throughput_mib_per_sec > 0.0);
        assert_eq!(throughput_mib_per_sec(1024 * 1024, Duration::from_millis(500)), 2.0);
        assert_eq!(throughput_mib_per_sec(10, Duration::ZERO), 0.0);
    }

    #[test]
    fn transform_report_records_stages() {
        let mut session = CipherSession::new(&KEY_128, &IV).unwrap();
        let mut buf = vec![0u8; 4096 + 5];
        let report = Variant::Private.transform_with_workers(&mut session, &mut buf, 2).unwrap();

        assert!(report.stage_times.has_all(&[Stage::Parallel]));
        assert_eq!(report.counters.tail_bytes, 5);
        assert_eq!(report.stage_times.get(Stage::Verify), Duration::ZERO);

        let json = serde_json::to_string(&report.counters).unwrap();
        assert!(json.contains("\"tail_bytes\":5"));
    }
}
