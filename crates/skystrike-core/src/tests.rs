#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::DriverCommand;
    use crate::components::Health;
    use crate::enums::*;
    use crate::events::FxEvent;
    use crate::state::WorldSnapshot;
    use crate::types::SimTime;

    /// Verify the enums round-trip through serde_json.
    #[test]
    fn test_enemy_state_serde() {
        let variants = vec![
            EnemyState::Patrol,
            EnemyState::Engage,
            EnemyState::Chase,
            EnemyState::Evade,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: EnemyState = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_mission_phase_serde() {
        let variants = vec![
            MissionPhase::DefendBase,
            MissionPhase::AttackObjective,
            MissionPhase::Victory,
            MissionPhase::Defeat,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: MissionPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_projectile_source_serde() {
        let variants = vec![
            ProjectileSource::Player,
            ProjectileSource::Enemy,
            ProjectileSource::Ally,
            ProjectileSource::Turret,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: ProjectileSource = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    /// Verify DriverCommand round-trips through serde (tagged union).
    #[test]
    fn test_driver_command_serde() {
        let commands = vec![
            DriverCommand::StartMission,
            DriverCommand::Restart,
            DriverCommand::UpdatePlayer {
                position: Vec3::new(1.0, 50.0, -3.0),
                forward: Vec3::Z,
                airborne: true,
            },
            DriverCommand::FireBullet {
                position: Vec3::ZERO,
                forward: Vec3::X,
            },
            DriverCommand::LaunchMissile {
                position: Vec3::new(0.0, 80.0, 0.0),
                forward: Vec3::X,
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: DriverCommand = serde_json::from_str(&json).unwrap();
            // Compare JSON representations since DriverCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Verify FxEvent round-trips through serde.
    #[test]
    fn test_fx_event_serde() {
        let event = FxEvent::new(FxKind::Massive, Vec3::new(900.0, 10.0, 600.0), 4.0);
        let json = serde_json::to_string(&event).unwrap();
        let back: FxEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event.kind, back.kind);
        assert_eq!(event.position, back.position);
    }

    /// Verify WorldSnapshot can be serialized to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = WorldSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    /// Health mutation always lands in [0, max].
    #[test]
    fn test_health_clamps_low() {
        let mut health = Health::full(3.0);
        health.apply(2.0);
        assert_eq!(health.current, 1.0);
        health.apply(25.0);
        assert_eq!(health.current, 0.0, "Health must clamp at zero");
        assert!(health.is_dead());
    }

    #[test]
    fn test_health_clamps_high() {
        let mut health = Health::full(100.0);
        // Negative damage must not push health above max.
        health.apply(-50.0);
        assert_eq!(health.current, 100.0);
    }

    /// Verify SimTime advancement with variable deltas.
    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        assert_eq!(time.tick, 0);
        assert_eq!(time.elapsed_secs, 0.0);

        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-4);
    }
}
