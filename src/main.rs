fn main() -> std::io::Result<()> {
    app_lib::run()
}
