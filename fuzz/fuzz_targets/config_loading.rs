#![no_main]

use ferrous_provider::{
    Arguments, MapEnvironment, ObjectRegistry, ResolverCore, ServiceCollection, YamlStrSource,
};
use libfuzzer_sys::fuzz_target;

// Arbitrary YAML must either fail to build or resolve every service
// without panicking.
fuzz_target!(|data: &[u8]| {
    let Ok(yaml) = std::str::from_utf8(data) else {
        return;
    };

    let mut registry = ObjectRegistry::new();
    registry.register_factory("fuzz.Echo", |args: Arguments| Ok(args.positional().len()));
    registry.register_object("fuzz.CONSTANT", std::sync::Arc::new(7_u32));

    let mut services = ServiceCollection::new();
    services
        .use_loader(registry)
        .use_environment(MapEnvironment::new().with_var("FUZZ", "'value'"))
        .add_source(YamlStrSource::new("fuzz.yaml", yaml));

    if let Ok(provider) = services.build() {
        for name in provider.list_service_names() {
            let _ = provider.resolve_any(&name, Arguments::new());
        }
    }
});
