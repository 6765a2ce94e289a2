//! Items used by code generated by `#[derive(JsonClass)]`.
//!
//! Not public API.

pub use crate::class::class_from_json;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::JsonClass;
    use crate::registry::SchemaRegistry;

    pub use inventory;

    /// A registration function collected at link time.
    pub struct __AutoRegisterFunc(pub fn(&mut SchemaRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Registers `T`, generic over the class so the derive can name it
    /// as a plain function pointer.
    pub fn __register<T: JsonClass>(registry: &mut SchemaRegistry) {
        registry.register::<T>();
    }

    // Only runs if the platform supports `inventory`.
    fn __mark_available(registry: &mut SchemaRegistry) {
        registry.mark_auto_registered();
    }

    inventory::submit! {
        __AutoRegisterFunc(__mark_available)
    }

    pub fn __register_types(registry: &mut SchemaRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
