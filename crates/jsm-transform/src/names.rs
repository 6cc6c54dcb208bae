//! Well-known names of the JSM idiom and of the CommonJS output

/// Privileged global whose aliases are tracked
pub const ROOT_NAMESPACE: &str = "Components";

/// Import-capability sub-namespace of [`ROOT_NAMESPACE`]
pub const UTILS_PROPERTY: &str = "utils";

/// Global that exposes `import` directly
pub const IMPORT_NAMESPACE: &str = "ChromeUtils";

/// Method name of the import primitive
pub const IMPORT_METHOD: &str = "import";

/// Receivers of the lazy-getter declarations
pub const LAZY_GETTER_HOSTS: [&str; 2] = ["XPCOMUtils", "ChromeUtils"];

/// Lazy-getter declaration methods
pub const LAZY_GETTER_METHODS: [&str; 2] = ["defineLazyModuleGetter", "defineModuleGetter"];

/// Identifier holding the export manifest
pub const MANIFEST_SYMBOL: &str = "EXPORTED_SYMBOLS";

/// Module-load function of the output
pub const MODULE_LOADER: &str = "require";

/// `module.exports`
pub const MODULE_OBJECT: &str = "module";
pub const EXPORTS_PROPERTY: &str = "exports";
