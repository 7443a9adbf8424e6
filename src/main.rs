use ocrbench::error::AppResult;

fn main() -> AppResult<()> {
    ocrbench::entry::run()
}
