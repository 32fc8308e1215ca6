use social_schema::{render_er, AppResult, Catalog, DiagramConfig};

fn main() -> AppResult<()> {
    env_logger::init();

    let config = DiagramConfig::default();
    let catalog = Catalog::social();

    match render_er(&catalog, &config) {
        Ok(()) => {
            println!("Success! Check the {} file", config.output.display());
            Ok(())
        }
        Err(err) => {
            println!("There was a problem generating the diagram");
            log::error!("err: {:?}", err);
            Err(err)
        }
    }
}
