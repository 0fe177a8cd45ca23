//! Native export macro and entry point.

/// Generate the library entry point for a plugin.
///
/// Implements [`NativePlugin`](crate::NativePlugin) for the plugin type and
/// emits `patchbay_plugin_descriptor`, an unmangled `extern "C"` function
/// that returns the plugin descriptor. The descriptor is built on the first
/// call and lives for the rest of the process. If the configuration is
/// invalid the function returns null and the reason is logged.
///
/// # Example
///
/// ```rust,ignore
/// use patchbay::prelude::*;
///
/// pub static CONFIG: PluginConfig = PluginConfig::new("My Plugin", "myplugin")
///     .with_audio_ports(0, 0)
///     .with_midi_ports(1, 1);
///
/// export_native!(CONFIG, MyPlugin);
/// ```
#[macro_export]
macro_rules! export_native {
    ($config:expr, $plugin:ty) => {
        impl $crate::NativePlugin for $plugin {
            fn config() -> &'static $crate::PluginConfig {
                &$config
            }
        }

        /// Plugin descriptor lookup for native hosts.
        #[no_mangle]
        pub extern "C" fn patchbay_plugin_descriptor() -> *const $crate::abi::NativePluginDescriptor {
            static DESCRIPTOR: ::std::sync::OnceLock<Option<$crate::Descriptor>> =
                ::std::sync::OnceLock::new();

            DESCRIPTOR
                .get_or_init(|| $crate::Descriptor::new::<$plugin>().ok())
                .as_ref()
                .map_or(::std::ptr::null(), |descriptor| descriptor.as_ptr())
        }
    };
}
