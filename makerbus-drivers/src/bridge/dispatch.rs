//! Bus command handling for the bridge module

use makerbus_core::traits::{BusModule, DispatchError};
use makerbus_hal::IoPort;
use makerbus_protocol::{Action, Command, Register, Request, Response};

use super::BusBridge;

impl<P: IoPort> BusBridge<P> {
    fn command(&self, byte: u8) -> Option<Command> {
        Command::from_byte(byte).filter(|command| {
            self.variant.is_extended() || !command.is_extended()
        })
    }

    fn read_register(
        &self,
        register: Register,
        response: &mut Response,
    ) -> Result<(), DispatchError> {
        match register {
            Register::Led => response.put_logical(self.led_get())?,
            Register::Encoder1 => response.put_integer(self.encoder1_get())?,
            Register::Encoder2 => response.put_integer(self.encoder2_get())?,
            Register::Motor1 => response.put_byte(self.motor1_get())?,
            Register::Motor2 => response.put_byte(self.motor2_get())?,
            Register::Motor1Reverse => response.put_logical(self.motor1_reverse_get())?,
            Register::Motor2Reverse => response.put_logical(self.motor2_reverse_get())?,
            Register::Encoder1Reverse => response.put_logical(self.encoder1_reverse_get())?,
            Register::Encoder2Reverse => response.put_logical(self.encoder2_reverse_get())?,
            Register::MotorsEncodersSwap => {
                response.put_logical(self.motors_encoders_swap_get())?
            }
            Register::Encoder1Latched => response.put_integer(self.encoder1_latched())?,
            Register::Encoder2Latched => response.put_integer(self.encoder2_latched())?,
        }
        Ok(())
    }

    /// Arguments are fully decoded and checked before anything changes
    fn write_register(
        &mut self,
        register: Register,
        request: &mut Request<'_>,
    ) -> Result<(), DispatchError> {
        match register {
            Register::Encoder1 => self.encoder1_set(Self::integer_arg(request)?),
            Register::Encoder2 => self.encoder2_set(Self::integer_arg(request)?),
            Register::Motor1 => self.motor1_set(Self::byte_arg(request)?),
            Register::Motor2 => self.motor2_set(Self::byte_arg(request)?),
            Register::Led => self.led_set(Self::logical_arg(request)?),
            Register::Motor1Reverse => self.motor1_reverse_set(Self::logical_arg(request)?),
            Register::Motor2Reverse => self.motor2_reverse_set(Self::logical_arg(request)?),
            Register::Encoder1Reverse => self.encoder1_reverse_set(Self::logical_arg(request)?),
            Register::Encoder2Reverse => self.encoder2_reverse_set(Self::logical_arg(request)?),
            Register::MotorsEncodersSwap => {
                self.motors_encoders_swap_set(Self::logical_arg(request)?)
            }
            Register::Encoder1Latched | Register::Encoder2Latched => {
                return Err(DispatchError::UnknownCommand(register.base() + 1));
            }
        }
        Ok(())
    }

    fn integer_arg(request: &mut Request<'_>) -> Result<i32, DispatchError> {
        let value = request.integer()?;
        request.finish()?;
        Ok(value)
    }

    fn byte_arg(request: &mut Request<'_>) -> Result<i8, DispatchError> {
        let value = request.byte()?;
        request.finish()?;
        Ok(value)
    }

    fn logical_arg(request: &mut Request<'_>) -> Result<bool, DispatchError> {
        let value = request.logical()?;
        request.finish()?;
        Ok(value)
    }
}

impl<P: IoPort> BusModule for BusBridge<P> {
    fn address(&self) -> u8 {
        self.address
    }

    fn dispatch(
        &mut self,
        command: u8,
        request: &mut Request<'_>,
        response: &mut Response,
    ) -> Result<(), DispatchError> {
        let Some(decoded) = self.command(command) else {
            makerbus_hal::warn!("bridge {}: unknown command {}", self.address, command);
            return Err(DispatchError::UnknownCommand(command));
        };

        match decoded {
            Command::Get(register) => {
                request.finish()?;
                self.read_register(register, response)
            }
            Command::Set(register) => self.write_register(register, request),
            Command::Do(action) => {
                request.finish()?;
                match action {
                    Action::EncodersReset => self.encoders_reset(),
                    Action::EncodersLatch => self.encoders_latch(),
                }
                Ok(())
            }
        }
    }

    fn serves(&self, command: u8) -> bool {
        self.command(command).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use makerbus_core::config::{BridgeConfig, Variant};
    use makerbus_core::drive::PhysicalAxis;
    use makerbus_hal::MockPort;
    use makerbus_protocol::command::{
        CMD_ENCODERS_LATCH, CMD_ENCODERS_RESET, REG_ENCODER1, REG_ENCODER1_LATCHED,
        REG_ENCODER1_REVERSE, REG_ENCODER2, REG_ENCODER2_LATCHED, REG_LED, REG_MOTOR1, REG_MOTOR2,
        REG_MOTORS_ENCODERS_SWAP,
    };
    use makerbus_protocol::{PayloadError, COMMAND_COUNT};

    fn bridge(variant: Variant) -> BusBridge<MockPort> {
        let mut config = BridgeConfig::new(0x20);
        config.variant = variant;
        BusBridge::new(&config, MockPort::new())
    }

    fn call(
        bridge: &mut BusBridge<MockPort>,
        command: u8,
        args: &[u8],
    ) -> Result<Response, DispatchError> {
        let mut request = Request::new(args);
        let mut response = Response::new();
        bridge.dispatch(command, &mut request, &mut response)?;
        Ok(response)
    }

    #[test]
    fn test_address() {
        assert_eq!(bridge(Variant::Extended).address(), 0x20);
    }

    #[test]
    fn test_set_then_get_motor() {
        let mut bridge = bridge(Variant::Extended);
        let response = call(&mut bridge, REG_MOTOR2 + 1, &[0xF6]).unwrap();
        assert!(response.is_empty());
        assert_eq!(bridge.motor2_get(), -10);

        let response = call(&mut bridge, REG_MOTOR2, &[]).unwrap();
        assert_eq!(response.as_bytes(), &[0xF6]);
    }

    #[test]
    fn test_encoder_is_big_endian() {
        let mut bridge = bridge(Variant::Extended);
        call(&mut bridge, REG_ENCODER1 + 1, &[0x00, 0x01, 0x02, 0x03]).unwrap();
        assert_eq!(bridge.encoder1_get(), 0x0001_0203);

        let response = call(&mut bridge, REG_ENCODER1, &[]).unwrap();
        assert_eq!(response.as_bytes(), &[0x00, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_logical_registers() {
        let mut bridge = bridge(Variant::Extended);
        call(&mut bridge, REG_LED + 1, &[0]).unwrap();
        assert!(!bridge.led_get());

        call(&mut bridge, REG_MOTORS_ENCODERS_SWAP + 1, &[0]).unwrap();
        let response = call(&mut bridge, REG_MOTORS_ENCODERS_SWAP, &[]).unwrap();
        assert_eq!(response.as_bytes(), &[0]);

        call(&mut bridge, REG_ENCODER1_REVERSE + 1, &[1]).unwrap();
        assert!(bridge.encoder1_reverse_get());
    }

    #[test]
    fn test_actions() {
        let mut bridge = bridge(Variant::Extended);
        bridge.encoder1_set(99);
        call(&mut bridge, CMD_ENCODERS_LATCH, &[]).unwrap();
        call(&mut bridge, CMD_ENCODERS_RESET, &[]).unwrap();

        assert_eq!(bridge.encoder1_get(), 0);
        assert_eq!(bridge.encoder1_latched(), 99);
    }

    #[test]
    fn test_latched_pair_read_over_bus() {
        let mut bridge = bridge(Variant::Extended);
        bridge.motors_encoders_swap_set(false);
        bridge.encoder1_reverse_set(false);
        bridge.encoder2_reverse_set(false);
        bridge.encoder1_set(100);
        bridge.encoder2_set(200);

        call(&mut bridge, CMD_ENCODERS_LATCH, &[]).unwrap();
        bridge.encoder_advance(PhysicalAxis::Primary, 5);
        bridge.encoder_advance(PhysicalAxis::Secondary, 5);

        let response = call(&mut bridge, REG_ENCODER1_LATCHED, &[]).unwrap();
        assert_eq!(response.as_bytes(), &[0, 0, 0, 100]);
        let response = call(&mut bridge, REG_ENCODER2_LATCHED, &[]).unwrap();
        assert_eq!(response.as_bytes(), &[0, 0, 0, 200]);

        // Live registers keep counting
        let response = call(&mut bridge, REG_ENCODER1, &[]).unwrap();
        assert_eq!(response.as_bytes(), &[0, 0, 0, 105]);
        let response = call(&mut bridge, REG_ENCODER2, &[]).unwrap();
        assert_eq!(response.as_bytes(), &[0, 0, 0, 205]);
    }

    #[test]
    fn test_latched_registers_have_no_set() {
        let mut bridge = bridge(Variant::Extended);
        for command in [REG_ENCODER1_LATCHED + 1, REG_ENCODER2_LATCHED + 1] {
            assert!(!bridge.serves(command));
            assert_eq!(
                call(&mut bridge, command, &[0, 0, 0, 1]).map(|_| ()),
                Err(DispatchError::UnknownCommand(command))
            );
        }
        assert_eq!(bridge.encoder1_latched(), 0);
    }

    #[test]
    fn test_write_register_targets_named_register() {
        let mut bridge = bridge(Variant::Extended);
        bridge.port().clear_log();

        call(&mut bridge, REG_MOTOR1 + 1, &[1]).unwrap();
        call(&mut bridge, REG_ENCODER2 + 1, &[0, 0, 0, 1]).unwrap();
        assert!(bridge.motors_encoders_swap_get());
        assert_eq!(bridge.motor1_get(), 1);
        assert_eq!(bridge.encoder2_get(), 1);

        assert_eq!(
            bridge.write_register(Register::Encoder1Latched, &mut Request::new(&[])),
            Err(DispatchError::UnknownCommand(REG_ENCODER1_LATCHED + 1))
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut bridge = bridge(Variant::Extended);
        assert_eq!(
            call(&mut bridge, COMMAND_COUNT, &[]).map(|_| ()),
            Err(DispatchError::UnknownCommand(COMMAND_COUNT))
        );
        assert!(!bridge.serves(COMMAND_COUNT));
        assert!(bridge.serves(REG_MOTORS_ENCODERS_SWAP + 1));
    }

    #[test]
    fn test_minimal_rejects_extended_commands() {
        let mut bridge = bridge(Variant::Minimal);
        for command in REG_ENCODER1_REVERSE..COMMAND_COUNT {
            assert!(!bridge.serves(command));
            assert_eq!(
                call(&mut bridge, command, &[1]).map(|_| ()),
                Err(DispatchError::UnknownCommand(command))
            );
        }
        assert!(bridge.serves(CMD_ENCODERS_LATCH));
        assert!(!bridge.motors_encoders_swap_get());
    }

    #[test]
    fn test_bad_arguments_leave_state_alone() {
        let mut bridge = bridge(Variant::Extended);
        bridge.port().clear_log();

        assert_eq!(
            call(&mut bridge, REG_MOTOR1 + 1, &[]).map(|_| ()),
            Err(DispatchError::Payload(PayloadError::Truncated))
        );
        assert_eq!(
            call(&mut bridge, REG_MOTOR1 + 1, &[5, 6]).map(|_| ()),
            Err(DispatchError::Payload(PayloadError::TrailingBytes))
        );
        assert_eq!(
            call(&mut bridge, REG_ENCODER1 + 1, &[1, 2, 3]).map(|_| ()),
            Err(DispatchError::Payload(PayloadError::Truncated))
        );
        assert_eq!(
            call(&mut bridge, CMD_ENCODERS_RESET, &[0]).map(|_| ()),
            Err(DispatchError::Payload(PayloadError::TrailingBytes))
        );

        assert_eq!(bridge.motor1_get(), 0);
        assert_eq!(bridge.encoder1_get(), 0);
        assert!(bridge.port().log().is_empty());
    }

    #[test]
    fn test_every_served_command_accepts_its_payload() {
        let mut bridge = bridge(Variant::Extended);
        for command in 0..COMMAND_COUNT {
            if !bridge.serves(command) {
                continue;
            }
            let args: &[u8] = match Command::from_byte(command) {
                Some(Command::Set(Register::Encoder1 | Register::Encoder2)) => &[0, 0, 0, 1],
                Some(Command::Set(_)) => &[1],
                _ => &[],
            };
            assert!(call(&mut bridge, command, args).is_ok(), "command {command}");
        }
    }
}
