#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // res/servicelog.ico must exist
    let mut res = WindowsResource::new();
    res.set_icon("res/servicelog.ico")
        .set("FileDescription", "servicelog CLI")
        .set("ProductName", "servicelog")
        .set("OriginalFilename", "servicelog.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed icon resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
