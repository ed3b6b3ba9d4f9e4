use helm_ctrl::ControlMode;

/// One operator action, parsed from a console line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCmd {
    Mode(ControlMode),
    Set(usize, f32),
    Zero(usize),
    Start,
    Stop,
    Auth,
    Deauth,
    Status,
    Pos,
    Help,
    Exit,
}

pub const HELP: &str = "\
commands:
  mode <0-3|pos|vel|attalt|attvel>   select control mode
  set <axis 0-3> <value>             write one setpoint (clamped)
  zero <axis 0-3>                    reset one setpoint
  start | stop                       toggle command streaming
  auth | deauth                      request/release control authority
  status                             show mode, flag, axes, streaming, authority
  pos                                query vehicle position
  exit                               stop streaming and quit";

fn parse_mode(word: &str) -> Option<ControlMode> {
    if let Ok(idx) = word.parse::<usize>() {
        return ControlMode::from_index(idx);
    }
    match word {
        "pos" => Some(ControlMode::PositionYaw),
        "vel" => Some(ControlMode::VelocityYawrate),
        "attalt" => Some(ControlMode::AttitudeAltitudeYawrate),
        "attvel" => Some(ControlMode::AttitudeVelocityYawrate),
        _ => None,
    }
}

fn parse_axis(word: &str) -> Option<usize> {
    word.parse::<usize>().ok().filter(|i| *i < 4)
}

pub fn parse(line: &str) -> Result<ConsoleCmd, String> {
    let mut words = line.split_whitespace();
    let cmd = words.next().ok_or("empty line")?;
    let out = match cmd {
        "mode" => {
            let word = words.next().ok_or("usage: mode <0-3|pos|vel|attalt|attvel>")?;
            ConsoleCmd::Mode(parse_mode(word).ok_or_else(|| format!("unknown mode: {}", word))?)
        }
        "set" => {
            let axis = words.next().and_then(parse_axis).ok_or("usage: set <axis 0-3> <value>")?;
            let value = words
                .next()
                .and_then(|w| w.parse::<f32>().ok())
                .ok_or("usage: set <axis 0-3> <value>")?;
            ConsoleCmd::Set(axis, value)
        }
        "zero" => {
            let axis = words.next().and_then(parse_axis).ok_or("usage: zero <axis 0-3>")?;
            ConsoleCmd::Zero(axis)
        }
        "start" => ConsoleCmd::Start,
        "stop" => ConsoleCmd::Stop,
        "auth" => ConsoleCmd::Auth,
        "deauth" => ConsoleCmd::Deauth,
        "status" => ConsoleCmd::Status,
        "pos" => ConsoleCmd::Pos,
        "help" | "?" => ConsoleCmd::Help,
        "exit" | "quit" => ConsoleCmd::Exit,
        other => return Err(format!("unknown command: {} (try 'help')", other)),
    };
    if words.next().is_some() {
        return Err(format!("trailing input after '{}'", cmd));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_by_index_and_name() {
        assert_eq!(parse("mode 1"), Ok(ConsoleCmd::Mode(ControlMode::VelocityYawrate)));
        assert_eq!(parse("mode attvel"), Ok(ConsoleCmd::Mode(ControlMode::AttitudeVelocityYawrate)));
        assert!(parse("mode 7").is_err());
    }

    #[test]
    fn parses_set_and_zero() {
        assert_eq!(parse("set 0 15"), Ok(ConsoleCmd::Set(0, 15.0)));
        assert_eq!(parse("set 3 -0.5"), Ok(ConsoleCmd::Set(3, -0.5)));
        assert_eq!(parse("zero 2"), Ok(ConsoleCmd::Zero(2)));
        assert!(parse("set 4 1.0").is_err());
        assert!(parse("set 1").is_err());
    }

    #[test]
    fn rejects_noise() {
        assert!(parse("").is_err());
        assert!(parse("launch").is_err());
        assert!(parse("start now").is_err());
    }
}
