//
// cargo run -- logo.png --align center --scale --output logo.bin
// cargo run -- logo.png --usb 04b8:0e15
//
use escpos_image::{write_image, Alignment, Config, Error, Model, Printer, UsbDevice};
use std::{fs::File, io, path::PathBuf, process};

#[derive(Debug, PartialEq)]
enum Target {
    Stdout,
    File(PathBuf),
    Usb(UsbDevice),
}

#[derive(Debug, PartialEq)]
struct Options {
    image: PathBuf,
    config: Config,
    target: Target,
}

fn print_usage() {
    eprintln!("Usage: escpos-image <IMAGE> [OPTIONS]");
    eprintln!("Options:");
    eprintln!("  -a, --align <left|center|right>  Horizontal position (default: left)");
    eprintln!("  -s, --scale                      Scale the image to the printer width");
    eprintln!("  -m, --model <80mm|58mm|DOTS>     Printer width (default: 80mm)");
    eprintln!("  -o, --output <FILE>              Write the commands to FILE");
    eprintln!("      --usb <VID:PID[:SERIAL]>     Send the commands to a USB printer");
    eprintln!("  -h, --help                       Show this help");
    eprintln!("\nWithout --output or --usb the commands are written to stdout.");
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>, Error> {
    let mut image = None;
    let mut alignment = Alignment::default();
    let mut scale = false;
    let mut model = Model::default();
    let mut target = Target::Stdout;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let name = arg.as_str();
        let mut value = || {
            iter.next()
                .ok_or_else(|| Error::InvalidConfig(format!("{} requires a value", name)))
        };

        match name {
            "-h" | "--help" => return Ok(None),
            "-a" | "--align" => alignment = value()?.parse()?,
            "-s" | "--scale" => scale = true,
            "-m" | "--model" => model = value()?.parse()?,
            "-o" | "--output" => target = Target::File(PathBuf::from(value()?)),
            "--usb" => target = Target::Usb(value()?.parse()?),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(Error::InvalidConfig(format!("unknown option '{}'", flag)))
            }
            path => {
                if image.is_some() {
                    return Err(Error::InvalidConfig(format!("unexpected argument '{}'", path)));
                }
                image = Some(PathBuf::from(path));
            }
        }
    }

    let image = image.ok_or_else(|| Error::InvalidConfig("no image given".to_string()))?;
    let config = Config::new(model).alignment(alignment).scale_to_width(scale);

    Ok(Some(Options {
        image,
        config,
        target,
    }))
}

fn run(options: Options) -> Result<(), Error> {
    let image = std::fs::read(&options.image)?;

    match options.target {
        Target::Stdout => {
            let stdout = io::stdout();
            write_image(&mut stdout.lock(), &image, &options.config)?;
        }
        Target::File(path) => {
            // Convert first so a bad image leaves no empty file behind.
            let buf = options.config.convert(&image)?;
            let mut file = File::create(&path)?;
            io::Write::write_all(&mut file, &buf)?;
            log::info!("wrote {} bytes to {}", buf.len(), path.display());
        }
        Target::Usb(device) => {
            let printer = Printer::new(device, options.config)?;
            printer.print(&image)?;
            log::info!("image sent to printer");
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            print_usage();
            process::exit(2);
        }
    };

    if let Err(err) = run(options) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
