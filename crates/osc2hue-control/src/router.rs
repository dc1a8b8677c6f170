//! Routing table and command delegation
//!
//! Every OSC address the bridge answers to is registered up front in an
//! explicit table. Each entry is a [`Route`] naming the shape and the light
//! id, so the per-light handlers are plain data instead of closures.
//!
//! Shapes funnel into one update path:
//! - `set` is normalized directly
//! - `brightness` and `color` are rewritten into a `set` argument list
//! - `on` builds its own power-only update
//! - `all/*` runs the single-light handler once per registered light

use std::collections::HashMap;

use osc2hue_core::{
    brightness_to_set, color_to_set, normalize_on, normalize_set, scalar::read_switch,
    CommandError, DeviceRegistry, Scalar, Shape, Target, UpdateIntent,
};
use tracing::{info, warn};

use crate::hue::LightBridge;
use crate::osc::address::{all_address, light_address};

/// Handler entry for one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Light (or all lights) the command applies to
    pub target: Target,
    /// Command form
    pub shape: Shape,
}

/// Result of a successfully dispatched command
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// A single light was updated
    Light {
        /// Light id
        light: String,
        /// Update sent to the bridge
        intent: UpdateIntent,
    },
    /// A command was applied to every light
    All(FanOutReport),
}

/// Per-light outcome of an all-lights command, in registry order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FanOutReport {
    /// Light id and what happened to it
    pub results: Vec<(String, Result<UpdateIntent, CommandError>)>,
}

impl FanOutReport {
    /// Number of lights a command was attempted on
    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    /// Number of lights updated successfully
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }

    /// Number of lights whose update failed
    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }
}

/// Maps OSC addresses to light updates
pub struct CommandRouter<B> {
    bridge: Option<B>,
    registry: DeviceRegistry,
    routes: HashMap<String, Route>,
}

impl<B: LightBridge> CommandRouter<B> {
    /// Build the routing table.
    ///
    /// Without a bridge every address still resolves, but each command
    /// reports [`CommandError::NotConnected`].
    pub fn new(bridge: Option<B>, registry: DeviceRegistry) -> Self {
        let mut routes = HashMap::new();

        for shape in Shape::ALL {
            routes.insert(
                all_address(shape),
                Route {
                    target: Target::All,
                    shape,
                },
            );
        }

        // Each light answers to its native id and its 1-based index
        let keys = registry
            .iter()
            .map(|light| light.id.clone())
            .chain(registry.indexed().map(|(index, _)| index.to_string()));
        for key in keys {
            let Some(light) = registry.resolve(&key) else {
                continue;
            };
            for shape in Shape::ALL {
                routes.insert(
                    light_address(&key, shape),
                    Route {
                        target: Target::Light(light.id.clone()),
                        shape,
                    },
                );
            }
        }

        Self {
            bridge,
            registry,
            routes,
        }
    }

    /// Whether a bridge client is available
    pub fn is_connected(&self) -> bool {
        self.bridge.is_some()
    }

    /// Route registered for an address
    pub fn route(&self, address: &str) -> Option<&Route> {
        self.routes.get(address)
    }

    /// All registered addresses, sorted
    pub fn addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.routes.keys().cloned().collect();
        addresses.sort();
        addresses
    }

    /// Handle one inbound message.
    ///
    /// Failures have already been logged when this returns; the error is
    /// handed back for callers that want to inspect it.
    pub async fn dispatch(&self, address: &str, args: &[Scalar]) -> Result<Dispatch, CommandError> {
        let route = self
            .route(address)
            .ok_or_else(|| CommandError::UnknownAddress(address.to_string()))?;
        self.execute(route, args).await
    }

    /// Run a resolved route
    pub async fn execute(&self, route: &Route, args: &[Scalar]) -> Result<Dispatch, CommandError> {
        let Some(bridge) = self.bridge.as_ref() else {
            warn!("Hue bridge not connected");
            return Err(CommandError::NotConnected);
        };

        match &route.target {
            Target::Light(light) => apply(bridge, light, route.shape, args)
                .await
                .map(|intent| Dispatch::Light {
                    light: light.clone(),
                    intent,
                }),
            Target::All => self.apply_all(bridge, route.shape, args).await.map(Dispatch::All),
        }
    }

    async fn apply_all(
        &self,
        bridge: &B,
        shape: Shape,
        args: &[Scalar],
    ) -> Result<FanOutReport, CommandError> {
        if let Err(e) = check_head(shape, args) {
            warn!("Rejected all lights {}: {}", shape, e);
            return Err(e);
        }

        let mut report = FanOutReport::default();
        for light in self.registry.iter() {
            let result = apply(bridge, &light.id, shape, args).await;
            report.results.push((light.id.clone(), result));
        }

        match (shape, read_switch(args, 0)) {
            (Shape::On, Ok(on)) => info!(
                "All lights turned {} ({}/{} succeeded, {} failed)",
                if on { "on" } else { "off" },
                report.succeeded(),
                report.attempted(),
                report.failed()
            ),
            _ => info!(
                "All lights updated ({}/{} succeeded, {} failed)",
                report.succeeded(),
                report.attempted(),
                report.failed()
            ),
        }
        Ok(report)
    }
}

/// Validate what an all-lights command needs before touching any light
fn check_head(shape: Shape, args: &[Scalar]) -> Result<(), CommandError> {
    match shape {
        Shape::On => read_switch(args, 0).map(|_| ()),
        Shape::Brightness => brightness_to_set(args).map(|_| ()),
        Shape::Color => color_to_set(args).map(|_| ()),
        Shape::Set if args.is_empty() => Err(CommandError::Malformed(
            "Set command requires at least 1 argument. Use -1 for null values.".to_string(),
        )),
        Shape::Set => Ok(()),
    }
}

/// Normalize a command for one light and send it, logging the outcome
async fn apply<B: LightBridge>(
    bridge: &B,
    light: &str,
    shape: Shape,
    args: &[Scalar],
) -> Result<UpdateIntent, CommandError> {
    let intent = match shape {
        Shape::On => normalize_on(args),
        Shape::Set => normalize_set(args),
        Shape::Brightness => brightness_to_set(args).and_then(|set| normalize_set(&set)),
        Shape::Color => color_to_set(args).and_then(|set| normalize_set(&set)),
    };

    let intent = match intent {
        Ok(intent) => intent,
        Err(e) => {
            warn!("Light {} {}: {}", light, shape, e);
            return Err(e);
        }
    };

    match bridge.update_light(light, &intent).await {
        Ok(()) => {
            info!("Light {} updated: {}", light, intent);
            Ok(intent)
        }
        Err(e) => {
            let err = CommandError::DeviceUpdate {
                light: light.to_string(),
                message: e.to_string(),
            };
            warn!("{}", err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hue::HueError;
    use async_trait::async_trait;
    use osc2hue_core::Light;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingBridge {
        calls: Arc<Mutex<Vec<(String, UpdateIntent)>>>,
        failing: Vec<String>,
    }

    impl RecordingBridge {
        fn calls(&self) -> Vec<(String, UpdateIntent)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LightBridge for RecordingBridge {
        async fn update_light(&self, light_id: &str, intent: &UpdateIntent) -> Result<(), HueError> {
            self.calls
                .lock()
                .unwrap()
                .push((light_id.to_string(), intent.clone()));
            if self.failing.iter().any(|id| id == light_id) {
                return Err(HueError::ApiError("device unreachable".to_string()));
            }
            Ok(())
        }
    }

    fn registry() -> DeviceRegistry {
        DeviceRegistry::new(vec![
            Light::new("a1b2", "Desk"),
            Light::new("c3d4", "Shelf"),
            Light::new("e5f6", "Ceiling"),
        ])
    }

    #[test]
    fn test_routes_cover_ids_and_indices() {
        let router = CommandRouter::new(Some(RecordingBridge::default()), registry());

        // 4 shapes x (3 ids + 3 indices + all)
        assert_eq!(router.addresses().len(), 28);

        let by_id = router.route("/hue/light/c3d4/color").unwrap();
        let by_index = router.route("/hue/light/2/color").unwrap();
        assert_eq!(by_id, by_index);
        assert_eq!(by_id.target, Target::Light("c3d4".to_string()));
        assert_eq!(by_id.shape, Shape::Color);

        assert_eq!(
            router.route("/hue/all/on").unwrap().target,
            Target::All
        );
        assert!(router.route("/hue/light/4/on").is_none());
    }

    #[test]
    fn test_native_id_wins_over_index() {
        let registry = DeviceRegistry::new(vec![Light::new("x", "One"), Light::new("1", "Two")]);
        let router = CommandRouter::new(Some(RecordingBridge::default()), registry);
        assert_eq!(
            router.route("/hue/light/1/on").unwrap().target,
            Target::Light("1".to_string())
        );
        // "x" is only reachable by id once its index is taken
        assert_eq!(
            router.route("/hue/light/2/on").unwrap().target,
            Target::Light("1".to_string())
        );
        assert_eq!(
            router.route("/hue/light/x/on").unwrap().target,
            Target::Light("x".to_string())
        );
        assert_eq!(router.addresses().len(), 16);
    }

    #[tokio::test]
    async fn test_unknown_address() {
        let router = CommandRouter::new(Some(RecordingBridge::default()), registry());
        let result = router.dispatch("/hue/light/zz/on", &[Scalar::Int(1)]).await;
        assert_eq!(
            result,
            Err(CommandError::UnknownAddress("/hue/light/zz/on".to_string()))
        );
    }

    #[tokio::test]
    async fn test_not_connected_short_circuits() {
        let router: CommandRouter<RecordingBridge> = CommandRouter::new(None, registry());
        assert!(!router.is_connected());

        for address in ["/hue/light/1/on", "/hue/all/set", "/hue/light/a1b2/brightness"] {
            let result = router.dispatch(address, &[Scalar::Int(1)]).await;
            assert_eq!(result, Err(CommandError::NotConnected));
        }
    }

    #[tokio::test]
    async fn test_on_builds_power_update() {
        let bridge = RecordingBridge::default();
        let router = CommandRouter::new(Some(bridge.clone()), registry());

        router
            .dispatch("/hue/light/1/on", &[Scalar::Bool(true), Scalar::Int(400)])
            .await
            .unwrap();

        assert_eq!(
            bridge.calls(),
            vec![(
                "a1b2".to_string(),
                UpdateIntent {
                    on: Some(true),
                    transition_ms: Some(400),
                    ..Default::default()
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_on_rejects_bad_type() {
        let bridge = RecordingBridge::default();
        let router = CommandRouter::new(Some(bridge.clone()), registry());

        let result = router
            .dispatch("/hue/light/1/on", &[Scalar::Unsupported("string".to_string())])
            .await;
        assert!(matches!(result, Err(CommandError::Malformed(_))));
        assert!(bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn test_brightness_delegates_to_set() {
        let bridge = RecordingBridge::default();
        let router = CommandRouter::new(Some(bridge.clone()), registry());

        router
            .dispatch("/hue/light/a1b2/brightness", &[Scalar::Float(0.8), Scalar::Int(2000)])
            .await
            .unwrap();
        router
            .dispatch(
                "/hue/light/a1b2/set",
                &[
                    Scalar::Int(-1),
                    Scalar::Int(-1),
                    Scalar::Float(0.8),
                    Scalar::Int(2000),
                ],
            )
            .await
            .unwrap();

        let calls = bridge.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn test_color_clamps() {
        let bridge = RecordingBridge::default();
        let router = CommandRouter::new(Some(bridge.clone()), registry());

        let dispatched = router
            .dispatch("/hue/light/3/color", &[Scalar::Float(-0.2), Scalar::Float(1.4)])
            .await
            .unwrap();

        match dispatched {
            Dispatch::Light { light, intent } => {
                assert_eq!(light, "e5f6");
                assert_eq!(intent.color, Some(osc2hue_core::XyColor { x: 0.0, y: 1.0 }));
                assert_eq!(intent.brightness, None);
            }
            other => panic!("Expected single light dispatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_noop_set_makes_no_call() {
        let bridge = RecordingBridge::default();
        let router = CommandRouter::new(Some(bridge.clone()), registry());
        let args = [Scalar::Int(-1), Scalar::Int(-1), Scalar::Int(-1), Scalar::Int(-1)];

        let result = router.dispatch("/hue/light/1/set", &args).await;
        assert_eq!(result, Err(CommandError::NoOp));

        let report = match router.dispatch("/hue/all/set", &args).await.unwrap() {
            Dispatch::All(report) => report,
            other => panic!("Expected fan-out, got {:?}", other),
        };
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.failed(), 3);
        assert!(bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn test_all_on_continues_after_failure() {
        let bridge = RecordingBridge {
            failing: vec!["c3d4".to_string()],
            ..Default::default()
        };
        let router = CommandRouter::new(Some(bridge.clone()), registry());

        let report = match router.dispatch("/hue/all/on", &[Scalar::Int(1)]).await.unwrap() {
            Dispatch::All(report) => report,
            other => panic!("Expected fan-out, got {:?}", other),
        };

        let called: Vec<String> = bridge.calls().into_iter().map(|(id, _)| id).collect();
        assert_eq!(called, vec!["a1b2", "c3d4", "e5f6"]);
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.succeeded(), 2);
        assert!(matches!(
            report.results[1].1,
            Err(CommandError::DeviceUpdate { .. })
        ));
    }

    #[tokio::test]
    async fn test_all_rejects_malformed_head() {
        let bridge = RecordingBridge::default();
        let router = CommandRouter::new(Some(bridge.clone()), registry());

        let result = router.dispatch("/hue/all/color", &[Scalar::Float(0.3)]).await;
        assert!(matches!(result, Err(CommandError::Malformed(_))));

        let result = router.dispatch("/hue/all/on", &[]).await;
        assert!(matches!(result, Err(CommandError::Malformed(_))));

        assert!(bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn test_all_brightness_matches_per_light() {
        let bridge = RecordingBridge::default();
        let router = CommandRouter::new(Some(bridge.clone()), registry());

        router
            .dispatch("/hue/all/brightness", &[Scalar::Int(127)])
            .await
            .unwrap();

        let calls = bridge.calls();
        assert_eq!(calls.len(), 3);
        for (_, intent) in &calls {
            assert!((intent.brightness.unwrap() - 0.5).abs() < 0.01);
            assert_eq!(intent.on, Some(true));
            assert!(intent.color.is_none());
        }
    }
}
