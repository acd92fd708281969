#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn config_default_interface() {
        let config_dut = Config::default();
        assert_eq!(config_dut.can_interface, "can0");
    }

    #[test]
    fn config_from_args_interface() {
        let args = vec!["test program", "-ci", "can1"];
        let args: Vec<String> = args.iter().map(|&arg| String::from(arg)).collect();

        let config_dut = Config::from_args(&args);

        assert_eq!(config_dut.can_interface, "can1");
    }

    #[test]
    fn config_from_args_ignores_unknown_pairs() {
        let args = vec!["test program", "-x", "whatever", "-ci", "vcan0"];
        let args: Vec<String> = args.iter().map(|&arg| String::from(arg)).collect();

        let config_dut = Config::from_args(&args);

        assert_eq!(config_dut.can_interface, "vcan0");
    }
}

pub struct Config {
    pub can_interface: String,
}

impl Config {
    pub fn new(can_interface: String) -> Config {
        Config { can_interface }
    }

    pub fn default() -> Config {
        Config {
            can_interface: String::from("can0"),
        }
    }

    /**
     * @brief from_args
     * This builds a Config item from a vector of command line arguments
     *
     * If the args vector is malformed, the function will panic and exit
     *
     * Currently accepted arguments:
     * -ci can_interface
     */
    pub fn from_args(args: &Vec<String>) -> Config {
        if args.len() % 2 == 0 {
            panic!("invalid arguments");
        }
        let mut i = args.len() - 1;
        let mut config = Config::default();

        while i > 1 {
            let param = &args[i];
            let param_type: &str = &args[i - 1];

            match param_type {
                "-ci" => {
                    config.can_interface = String::from(param);
                }
                _ => (),
            }
            i -= 2; // read arguments in pairs
        }
        config
    }
}
