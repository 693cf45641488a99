use clap::{crate_version, value_parser, Arg, ArgAction, Command, ValueHint};

pub fn build_cli() -> Command {
    let long_help = "fat8kit is always invoked with exactly one of several subcommands.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
extract a disk:          `fat8kit extract game.d88`
extract piped input:     `cat game.d88 | fat8kit extract -`
inspect the format:      `fat8kit stat -d game.d88 --indent 2`
decode machine text:     `fat8kit filter -c pc98 -d decode < LISTING.asc`
encode back to machine:  `fat8kit filter -c pc98 -d encode < listing.txt`";

    let indent_arg = Arg::new("indent").long("indent").help("JSON indentation, omit to minify")
        .value_name("SPACES")
        .value_parser(value_parser!(u16).range(0..16))
        .required(false);

    let mut main_cmd = Command::new("fat8kit")
        .about("Extracts files from FAT8 floppy images in D88 containers (NEC PC series, Pasopia).")
        .after_long_help(long_help)
        .version(crate_version!());

    main_cmd = main_cmd.subcommand(
        Command::new("extract")
            .arg(Arg::new("dimg").help("paths to D88 containers, `-` means piped input")
                .value_name("PATH").value_hint(ValueHint::FilePath).num_args(1..).required(true)
            )
            .arg(Arg::new("out").long("out").short('o').help("parent directory for the output directories")
                .value_name("DIR").value_hint(ValueHint::DirPath).required(false)
            )
            .about("extract every disk of every container into sibling directories")
            .after_help("structural errors are reported in the output directory suffix,
the exit code reflects only I/O and argument errors")
    );
    main_cmd = main_cmd.subcommand(
        Command::new("filter")
            .arg(Arg::new("charset").long("charset").short('c').help("machine character set")
                .value_name("NAME").required(true).value_parser(["pc98", "pc6001"])
            )
            .arg(Arg::new("direction").long("direction").short('d').help("direction of the mapping")
                .value_name("DIR").required(true).value_parser(["decode", "encode"])
            )
            .arg(Arg::new("strict").long("strict").help("fail on unmappable input instead of substituting `?`")
                .action(ArgAction::SetTrue)
            )
            .about("translate machine text to UTF-8 or back, one line at a time")
    );
    main_cmd = main_cmd.subcommand(
        Command::new("stat")
            .arg(Arg::new("dimg").long("dimg").short('d').help("path to disk image itself")
                .value_name("PATH").value_hint(ValueHint::FilePath).required(false)
            )
            .arg(indent_arg.clone())
            .about("write detected format and geometry as a JSON string to stdout")
            .after_help("if disk image is piped, omit `--dimg` option"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("completions")
            .arg(Arg::new("shell").help("shell to generate completions for")
                .value_name("SHELL").required(true)
                .value_parser(["bash", "elv", "fish", "ps1", "zsh"])
            )
            .about("write completions script to stdout"),
    );
    return main_cmd;
}
