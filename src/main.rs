use colored::Colorize;
use subnet_info::output::render_summary;
use subnet_info::Subnet;

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    log::info!("#Start main()");

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let inclusive = raw.iter().any(|a| a == "--inclusive");
    let args: Vec<String> = raw.into_iter().filter(|a| a != "--inclusive").collect();

    let subnet = match args.as_slice() {
        [cidr] => Subnet::from_cidr(cidr),
        [address, mask] => Subnet::from_address_and_mask(address, mask),
        _ => {
            eprintln!("Usage: subnet-info [--inclusive] <a.b.c.d/n> | <address> <netmask>");
            std::process::exit(2);
        }
    };

    let mut subnet = match subnet {
        Ok(subnet) => subnet,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{error} {e}", error = "error:".red());
            std::process::exit(1);
        }
    };
    subnet.set_inclusive_host_count(inclusive);

    println!("{}", render_summary(&subnet));
    log::info!("#Done main()");
}
