use crate::error::{FincaError, Result};
use crate::models::{Carrot, Conifer, Crop, CropKind, CropVariant, Lettuce, Olive, Tree, Vegetable};
use std::collections::HashMap;

type DisplayHandler = Box<dyn Fn(&Crop) -> Option<String> + Send + Sync>;
type ValidationHandler = Box<dyn Fn(&Crop) -> Option<bool> + Send + Sync>;

/// Kind-keyed handler tables for operations that vary by crop kind but do
/// not belong on the crop itself.
///
/// Each operation owns one map. Adding an operation means adding a map;
/// adding a crop kind means adding one entry to every map. Built once at
/// startup and shared read-only afterwards.
pub struct CropDispatchRegistry {
    display_handlers: HashMap<CropKind, DisplayHandler>,
    validation_handlers: HashMap<CropKind, ValidationHandler>,
}

impl CropDispatchRegistry {
    /// A registry with no handlers at all.
    pub fn empty() -> Self {
        Self {
            display_handlers: HashMap::new(),
            validation_handlers: HashMap::new(),
        }
    }

    /// A registry with the report and validation handlers for every kind.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register_display(display_conifer);
        registry.register_display(display_olive);
        registry.register_display(display_lettuce);
        registry.register_display(display_carrot);

        registry.register_validation(|c: &Conifer| c.height() >= 1.0 && c.surface_area >= 5.0);
        registry.register_validation(|o: &Olive| o.height() >= 0.5 && o.annual_yield() >= 0.0);
        registry.register_validation(|l: &Lettuce| l.growth_days() <= 90);
        registry.register_validation(|c: &Carrot| c.depth >= 0.2);

        registry
    }

    pub fn register_display<T, F>(&mut self, handler: F)
    where
        T: CropVariant + 'static,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.display_handlers.insert(
            T::KIND,
            Box::new(move |crop: &Crop| T::from_crop(crop).map(&handler)),
        );
    }

    pub fn register_validation<T, F>(&mut self, handler: F)
    where
        T: CropVariant + 'static,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.validation_handlers.insert(
            T::KIND,
            Box::new(move |crop: &Crop| T::from_crop(crop).map(&handler)),
        );
    }

    /// Formatted, read-only report of a crop's fields.
    pub fn display(&self, crop: &Crop) -> Result<String> {
        let kind = crop.kind();
        self.display_handlers
            .get(&kind)
            .and_then(|handler| handler(crop))
            .ok_or(FincaError::UnregisteredHandler(kind))
    }

    pub fn display_all(&self, crops: &[Crop]) -> Result<Vec<String>> {
        crops.iter().map(|c| self.display(c)).collect()
    }

    pub fn validate(&self, crop: &Crop) -> Result<bool> {
        let kind = crop.kind();
        self.validation_handlers
            .get(&kind)
            .and_then(|handler| handler(crop))
            .ok_or(FincaError::UnregisteredHandler(kind))
    }

    /// Kinds with a display handler, in declaration order.
    pub fn registered_kinds(&self) -> Vec<CropKind> {
        let mut kinds: Vec<CropKind> = self.display_handlers.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl Default for CropDispatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CropDispatchRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CropDispatchRegistry")
            .field("display", &self.registered_kinds())
            .field("validation", &self.validation_handlers.len())
            .finish()
    }
}

fn display_conifer(c: &Conifer) -> String {
    format!(
        "Conifer | surface: {} m² | height: {:.2} m | annual yield: {:.2}",
        c.surface_area,
        c.height(),
        c.annual_yield()
    )
}

fn display_olive(o: &Olive) -> String {
    format!(
        "Olive ({}) | surface: {} m² | height: {:.2} m | annual yield: {:.2}",
        o.variety,
        o.surface_area,
        o.height(),
        o.annual_yield()
    )
}

fn display_lettuce(l: &Lettuce) -> String {
    format!(
        "Lettuce | surface: {} m² | growth days: {} | watered: {}",
        l.surface_area,
        l.growth_days(),
        yes_no(l.is_watered())
    )
}

fn display_carrot(c: &Carrot) -> String {
    format!(
        "Carrot | surface: {} m² | growth days: {} | depth: {} m | watered: {}",
        c.surface_area,
        c.growth_days(),
        c.depth,
        yes_no(c.is_watered())
    )
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::factory::{CropFactory, CropParams};
    use crate::models::AbsorbWater;

    fn crop(kind: &str) -> Crop {
        CropFactory::create(kind, &CropParams::new()).unwrap()
    }

    #[test]
    fn every_kind_has_a_report() {
        let registry = CropDispatchRegistry::new();
        assert_eq!(registry.registered_kinds(), CropKind::all().to_vec());
        for kind in CropKind::all() {
            let report = registry.display(&crop(kind.as_str())).unwrap();
            assert!(report.starts_with(kind.as_str()), "{}", report);
        }
    }

    #[test]
    fn report_reflects_fields() {
        let registry = CropDispatchRegistry::new();
        assert_eq!(
            registry.display(&crop("olive")).unwrap(),
            "Olive (Manzanilla) | surface: 8 m² | height: 1.20 m | annual yield: 0.00"
        );

        let mut carrot = crop("carrot");
        carrot.absorb_water(1.0).unwrap();
        assert_eq!(
            registry.display(&carrot).unwrap(),
            "Carrot | surface: 3 m² | growth days: 80 | depth: 0.3 m | watered: yes"
        );
    }

    #[test]
    fn display_does_not_mutate() {
        let registry = CropDispatchRegistry::new();
        let lettuce = crop("lettuce");
        let before = lettuce.clone();
        registry.display(&lettuce).unwrap();
        assert_eq!(lettuce, before);
    }

    #[test]
    fn unregistered_kind_fails() {
        let mut registry = CropDispatchRegistry::empty();
        registry.register_display(display_lettuce);

        assert!(registry.display(&crop("lettuce")).is_ok());
        let err = registry.display(&crop("pino")).unwrap_err();
        assert!(matches!(
            err,
            FincaError::UnregisteredHandler(CropKind::Conifer)
        ));
        assert!(matches!(
            registry.validate(&crop("lettuce")),
            Err(FincaError::UnregisteredHandler(CropKind::Lettuce))
        ));
    }

    #[test]
    fn custom_handler_replaces_default() {
        let mut registry = CropDispatchRegistry::new();
        registry.register_display(|c: &Conifer| format!("pine {:.1}", c.height()));
        assert_eq!(registry.display(&crop("pine")).unwrap(), "pine 1.0");
    }

    #[test]
    fn validation_rules_per_kind() {
        let registry = CropDispatchRegistry::new();
        for kind in CropKind::all() {
            assert!(registry.validate(&crop(kind.as_str())).unwrap(), "{}", kind);
        }

        let short_pine = CropFactory::create("pine", &CropParams::new().with("height", 0.5)).unwrap();
        assert!(!registry.validate(&short_pine).unwrap());

        let slow_lettuce =
            CropFactory::create("lettuce", &CropParams::new().with("growth_days", 120)).unwrap();
        assert!(!registry.validate(&slow_lettuce).unwrap());

        let shallow_carrot =
            CropFactory::create("carrot", &CropParams::new().with("depth", 0.1)).unwrap();
        assert!(!registry.validate(&shallow_carrot).unwrap());
    }

    #[test]
    fn display_all_stops_at_first_unregistered() {
        let mut registry = CropDispatchRegistry::empty();
        registry.register_display(display_carrot);
        let crops = vec![crop("carrot"), crop("olive")];
        assert!(registry.display_all(&crops).is_err());
        assert_eq!(registry.display_all(&crops[..1]).unwrap().len(), 1);
    }
}
