use protocell_core::config::AppConfig;
use protocell_core::Registry;
use protocell_lib::model::World;
use std::sync::Arc;

/// Two weightless compounds X (0) and Y (1) and one X -> Y conversion.
#[allow(dead_code)]
pub fn xy_registry() -> Arc<Registry> {
    Arc::new(
        Registry::from_toml_str(
            r#"
            [[compounds]]
            name = "x"
            unit_volume = 0.0

            [[compounds]]
            name = "y"
            unit_volume = 0.0

            [[processes]]
            name = "convert"
            inputs = [{ compound = 0, weight = 1 }]
            outputs = [{ compound = 1, weight = 1 }]
            "#,
        )
        .expect("registry definition is valid"),
    )
}

/// X -> Y -> Z chain. Y carries storage volume so that converting it
/// onward stays profitable at equal prices.
#[allow(dead_code)]
pub fn chain_registry() -> Arc<Registry> {
    Arc::new(
        Registry::from_toml_str(
            r#"
            [[compounds]]
            name = "x"
            unit_volume = 0.0

            [[compounds]]
            name = "y"
            unit_volume = 1.0

            [[compounds]]
            name = "z"
            unit_volume = 0.0

            [[processes]]
            name = "make_y"
            inputs = [{ compound = 0, weight = 1 }]
            outputs = [{ compound = 1, weight = 1 }]

            [[processes]]
            name = "make_z"
            inputs = [{ compound = 1, weight = 1 }]
            outputs = [{ compound = 2, weight = 1 }]
            "#,
        )
        .expect("registry definition is valid"),
    )
}

/// A world with deterministic seed and no random starting compounds.
#[allow(dead_code)]
pub fn empty_world(registry: Arc<Registry>) -> World {
    let mut config = AppConfig::default();
    config.world.seed = Some(42);
    config.world.initial_population = 0;
    config.organism.initial_compound_max = 0.0;
    config.species.clear();
    World::new(config, registry)
}
