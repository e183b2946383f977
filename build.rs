fn main() {
    // Only run on Windows
    #[cfg(target_os = "windows")]
    {
        // Embed the application icon into the executable. The icon is
        // optional and the build must tolerate its absence.
        if std::path::Path::new("assets/icon.ico").exists() {
            let mut res = winresource::WindowsResource::new();
            res.set_icon("assets/icon.ico");
            res.set("ProductName", "Dig Tool");
            res.set("FileDescription", "On-screen game automation helper");
            res.set("LegalCopyright", "Copyright (c) 2025");
            res.compile().expect("Failed to compile Windows resources");
        }
    }
}
