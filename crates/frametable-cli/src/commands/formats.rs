use frametable_emit::FormatRegistry;

pub fn listing(registry: &FormatRegistry) -> String {
    let mut out = format!("Supported formats ({}):\n", registry.len());
    for entry in registry.iter() {
        out.push_str(&format!("  {:<10} {}\n", entry.name, entry.description));
    }
    out
}

pub fn run() {
    print!("{}", listing(&FormatRegistry::with_builtin_formats()));
}
