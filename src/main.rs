use anyhow::Result;

fn main() -> Result<()> {
    sol_import_fixer::run_cli()
}
